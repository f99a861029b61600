//! Bounded human tables shared by the list commands.

use crate::pagination::Page;
use crate::types::{Entity, Hub, HubFile, Project, Property};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

/// Truncate to `width` characters.
fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(header);
    table
}

fn with_footer<T>(mut output: String, page: &Page<T>, noun: &str) -> String {
    if page.has_more() {
        output.push_str(&format!(
            "\n\nShowing {} of {} {}",
            page.items.len(),
            page.total_count,
            noun
        ));
    }
    output
}

pub fn format_projects_table(page: &Page<Project>) -> String {
    if page.items.is_empty() {
        return "No projects found.".to_string();
    }
    let mut table = table(vec!["ID", "Name", "Type"]);
    for project in &page.items {
        table.add_row(vec![
            project.id.clone(),
            clip(&project.name, 40),
            project.project_type.clone(),
        ]);
    }
    with_footer(table.to_string(), page, "projects")
}

pub fn format_entities_table(page: &Page<Entity>) -> String {
    if page.items.is_empty() {
        return "No entities found.".to_string();
    }
    let mut table = table(vec!["ID", "Name"]);
    for entity in &page.items {
        let name = entity.name.as_deref().unwrap_or("(unnamed)");
        table.add_row(vec![entity.id.clone(), clip(name, 50)]);
    }
    with_footer(table.to_string(), page, "entities")
}

pub fn format_properties_table(properties: &[Property]) -> String {
    if properties.is_empty() {
        return "No properties found.".to_string();
    }
    let mut table = table(vec!["Slug", "Name", "Type", "Tool"]);
    for property in properties {
        table.add_row(vec![
            clip(&property.slug, 25),
            clip(&property.name, 30),
            clip(&property.property_type, 12),
            clip(&property.tool, 15),
        ]);
    }
    table.to_string()
}

pub fn format_hubs_table(hubs: &[Hub]) -> String {
    if hubs.is_empty() {
        return "No hubs found.".to_string();
    }
    let mut table = table(vec!["ID", "Name", "Files", "Status"]);
    for hub in hubs {
        table.add_row(vec![
            hub.id.clone(),
            clip(&hub.name, 40),
            hub.file_count.to_string(),
            hub.status.clone(),
        ]);
    }
    table.to_string()
}

pub fn format_hub_files_table(files: &[HubFile]) -> String {
    if files.is_empty() {
        return "No files in hub.".to_string();
    }
    let mut table = table(vec!["ID", "Name", "Type", "Size"]);
    for file in files {
        table.add_row(vec![
            file.id.clone(),
            clip(&file.name, 50),
            file.content_type.clone().unwrap_or_default(),
            file.size.map(|s| s.to_string()).unwrap_or_default(),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::FromRecord;
    use serde_json::json;

    fn project(id: &str) -> Project {
        Project::from_record(json!({"id": id, "name": "Invoices"})).unwrap()
    }

    #[test]
    fn footer_only_when_more_remain() {
        let page = Page {
            items: vec![project("p1"), project("p2")],
            total_count: 45,
            offset: 0,
            limit: 2,
        };
        let out = format_projects_table(&page);
        assert!(out.contains("Invoices"));
        assert!(out.ends_with("Showing 2 of 45 projects"));

        let complete = Page {
            total_count: 2,
            ..page
        };
        assert!(!format_projects_table(&complete).contains("Showing"));
    }

    #[test]
    fn empty_lists_have_messages() {
        let page: Page<Entity> = Page {
            items: vec![],
            total_count: 0,
            offset: 0,
            limit: 20,
        };
        assert_eq!(format_entities_table(&page), "No entities found.");
        assert_eq!(format_hubs_table(&[]), "No hubs found.");
    }

    #[test]
    fn clip_counts_characters() {
        assert_eq!(clip("héllo", 2), "hé");
        assert_eq!(clip("ab", 10), "ab");
    }
}
