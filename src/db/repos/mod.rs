mod source_feeds;
mod translated_feeds;

pub use source_feeds::SourceFeedRepo;
pub use translated_feeds::TranslatedFeedRepo;
