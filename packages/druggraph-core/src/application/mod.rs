/*
 * Application Layer - Read-side reports over a built graph
 *
 * - drug_mentions: every document / journal mentioning the named drugs
 * - journals_with_distinct_mentions: journal ranking by distinct drugs
 */

pub mod reports;

pub use reports::{
    drug_mentions, journals_with_distinct_mentions, DrugMentionEntry, JournalMentionCount,
};
