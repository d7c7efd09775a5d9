//! Reusable template components.

pub mod add_category;
pub mod table_skeleton;

pub use add_category::AddCategoryButton;
pub use table_skeleton::TableSkeleton;
