mod record_id;
pub use record_id::RecordId;

mod sort_direction;
pub use sort_direction::SortDirection;

mod query_state;
pub use query_state::{DEFAULT_ITEMS_PER_PAGE, QueryState};

mod list_page;
pub use list_page::ListPage;

mod application;
pub use application::Application;

mod env_variable;
pub use env_variable::EnvVariable;

mod access_key;
pub use access_key::{AccessKey, AccessKeyStatus};

mod group;
pub use group::Group;

mod role;
pub use role::Role;

mod permission;
pub use permission::{Permission, PermissionAction, PermissionResource};

mod env_value_change;
pub use env_value_change::{ChangeKind, EnvValueChange};

/// Deployment environment name (`"production"`, `"staging"`, ...).
///
/// Environments are free-form labels owned by the backend.
pub type Environment = String;
