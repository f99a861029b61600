//! JSON projections of records for machine output.

use crate::types::{Entity, Hub, HubFile, Project, Property};
use serde_json::{json, Map, Value};

pub fn project_summary_json(project: &Project) -> Value {
    json!({
        "id": project.id,
        "name": project.name,
        "type": project.project_type,
    })
}

pub fn project_detail_json(project: &Project) -> Value {
    json!({
        "id": project.id,
        "name": project.name,
        "type": project.project_type,
        "description": project.description,
        "created_at": project.created_at,
        "folder_id": project.folder_id,
        "parent_property": project.parent_property,
    })
}

pub fn property_summary_json(property: &Property) -> Value {
    json!({
        "id": property.id,
        "slug": property.slug,
        "name": property.name,
        "type": property.property_type,
        "tool": property.tool,
    })
}

pub fn property_detail_json(property: &Property) -> Value {
    json!({
        "id": property.id,
        "slug": property.slug,
        "name": property.name,
        "type": property.property_type,
        "tool": property.tool,
        "description": property.description,
        "tool_config": property.tool_config,
    })
}

/// Entity with each field flattened to its effective value.
pub fn entity_summary_json(entity: &Entity) -> Value {
    let fields: Map<String, Value> = entity
        .field_values
        .iter()
        .map(|(slug, field)| (slug.clone(), field.value().cloned().unwrap_or(Value::Null)))
        .collect();
    json!({
        "id": entity.id,
        "name": entity.name,
        "field_values": fields,
    })
}

pub fn entity_detail_json(entity: &Entity) -> Value {
    let fields: Map<String, Value> = entity
        .field_values
        .iter()
        .map(|(slug, field)| {
            (
                slug.clone(),
                json!({
                    "value": field.value(),
                    "status": field.status,
                    "error": field.error,
                }),
            )
        })
        .collect();
    json!({
        "id": entity.id,
        "name": entity.name,
        "project_id": entity.project_id,
        "field_values": fields,
    })
}

pub fn hub_summary_json(hub: &Hub) -> Value {
    json!({
        "id": hub.id,
        "name": hub.name,
        "file_count": hub.file_count,
        "status": hub.status,
    })
}

pub fn hub_json(hub: &Hub) -> Value {
    json!({
        "id": hub.id,
        "name": hub.name,
        "description": hub.description,
        "status": hub.status,
        "file_count": hub.file_count,
        "created_at": hub.created_at,
    })
}

pub fn hub_file_json(file: &HubFile) -> Value {
    json!({
        "id": file.id,
        "name": file.name,
        "content_type": file.content_type,
        "size": file.size,
    })
}
