//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod contact_message_repo;
pub mod event_repo;
pub mod gallery_photo_repo;
pub mod hero_slide_repo;
pub mod invitation_repo;
pub mod media_folder_repo;
pub mod media_repo;
pub mod partner_repo;
pub mod press_article_repo;
pub mod press_release_repo;
pub mod session_repo;
pub mod setting_repo;
pub mod show_repo;
pub mod team_member_repo;
pub mod user_repo;
pub mod venue_repo;

pub use contact_message_repo::ContactMessageRepo;
pub use event_repo::EventRepo;
pub use gallery_photo_repo::GalleryPhotoRepo;
pub use hero_slide_repo::HeroSlideRepo;
pub use invitation_repo::InvitationRepo;
pub use media_folder_repo::MediaFolderRepo;
pub use media_repo::MediaRepo;
pub use partner_repo::PartnerRepo;
pub use press_article_repo::PressArticleRepo;
pub use press_release_repo::PressReleaseRepo;
pub use session_repo::SessionRepo;
pub use setting_repo::SettingRepo;
pub use show_repo::ShowRepo;
pub use team_member_repo::TeamMemberRepo;
pub use user_repo::UserRepo;
pub use venue_repo::VenueRepo;
