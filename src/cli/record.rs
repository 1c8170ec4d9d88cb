//! Record commands.

use tracing::info;

use crate::cli::context::{read_fields, Context};
use crate::cli::output;
use crate::core::domain::RecordKind;
use crate::error::Result;

/// Add a record and print its id.
pub fn add(ctx: &Context, kind: RecordKind, name: &str, fields: Vec<String>) -> Result<()> {
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;
    let fields = read_fields(fields, kind.field_names())?;
    let values: Vec<&str> = fields.iter().map(|f| f.as_str()).collect();

    let id = vault.add_record(&session, kind, name, &values)?;
    info!(record = %id, "added record");
    output::success(&format!("added {} {}", kind.label(), output::id(&id)));
    println!("{}", id);
    Ok(())
}

/// List the acting user's records.
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;
    let records = vault.records(&session)?;

    if json {
        let result = serde_json::json!({
            "records": records,
            "count": records.len()
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if records.is_empty() {
        output::dimmed("no records stored");
    } else {
        output::section(&format!("{} records", records.len()));
        for record in &records {
            output::list_item(&format!(
                "{}  {:<7}  {}",
                output::id(&record.id),
                record.kind.as_str(),
                record.name
            ));
        }
    }
    Ok(())
}

/// Print a record's fields.
pub fn show(ctx: &Context, id: &str, json: bool) -> Result<()> {
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;
    let record = vault.reveal(&session, id)?;

    if json {
        let fields: serde_json::Map<String, serde_json::Value> = record
            .fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.as_str().into()))
            .collect();
        let result = serde_json::json!({
            "id": record.id,
            "kind": record.kind,
            "name": record.name,
            "fields": fields,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::section(&format!("{} ({})", record.name, record.kind));
        for (name, value) in &record.fields {
            output::kv(name, value.as_str());
        }
    }
    Ok(())
}

/// Replace a record's fields.
pub fn edit(ctx: &Context, id: &str, fields: Vec<String>) -> Result<()> {
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;
    let kind = vault.reveal(&session, id)?.kind;
    let fields = read_fields(fields, kind.field_names())?;
    let values: Vec<&str> = fields.iter().map(|f| f.as_str()).collect();

    vault.update_record(&session, id, &values)?;
    output::success(&format!("updated {}", output::id(id)));
    Ok(())
}

/// Drop the acting user's access to a record.
pub fn rm(ctx: &Context, id: &str) -> Result<()> {
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;

    if vault.remove_record(&session, id)? {
        output::success(&format!("deleted {}", output::id(id)));
    } else {
        output::success(&format!("removed your access to {}", output::id(id)));
        output::hint("other owners still hold this record");
    }
    Ok(())
}
