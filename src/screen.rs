pub mod dashboard;
pub mod manage_tags;
pub mod preferences;
pub mod search;
pub mod upload;

pub use dashboard::Dashboard;
pub use manage_tags::ManageTags;
pub use preferences::Preferences;
pub use search::Search;
pub use upload::Upload;

pub enum Screen {
    Dashboard(Dashboard),
    Upload(Upload),
    Search(Search),
    ManageTags(ManageTags),
    Preferences(Preferences),
}
