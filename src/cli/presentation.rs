//! CLI presentation: human text and machine JSON per command family.

mod agent;
mod records;
mod shared;

pub use agent::{
    format_export_text, format_session_text, fixer_session_json, session_json,
};
pub use records::{
    entity_detail_json, entity_summary_json, hub_file_json, hub_json, hub_summary_json,
    project_detail_json, project_summary_json, property_detail_json, property_summary_json,
};
pub use shared::{
    format_entities_table, format_hub_files_table, format_hubs_table, format_projects_table,
    format_properties_table,
};
