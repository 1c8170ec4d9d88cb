//! Share commands.
//!
//! `create` prints the share link to stdout and nowhere else: it carries the
//! share secret.

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::share::{Decision, ShareLink};
use crate::error::Result;

/// Share a record with `receiver` and print the link.
pub fn create(ctx: &Context, record: &str, receiver: &str) -> Result<()> {
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;

    let (share_id, link) =
        vault.create_share(&session, record, receiver, &ctx.config().share.base_url)?;
    output::success(&format!(
        "share {} created for {}",
        output::id(&share_id),
        receiver
    ));
    if !vault.users()?.iter().any(|u| u == receiver) {
        output::warn(&format!(
            "{} is not registered yet; they need to run `hexagon user add` before accepting",
            receiver
        ));
    }
    output::hint("send this link to the receiver; it is the only copy of the share key");
    println!("{}", link.as_str());
    Ok(())
}

/// Accept or decline a share link as the acting user.
pub fn finalize(ctx: &Context, link: &str, decision: Decision) -> Result<()> {
    let (share_id, secret) = ShareLink::parse(link)?;
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;

    match vault.finalize_share(&session, &share_id, &secret, decision)? {
        Some(record) => {
            output::success(&format!("accepted, record {}", output::id(&record)));
            println!("{}", record);
        }
        None => output::success("declined"),
    }
    Ok(())
}

/// Cancel a pending share.
pub fn cancel(ctx: &Context, record: &str, share_id: &str) -> Result<()> {
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;

    vault.delete_share(&session, record, share_id)?;
    output::success(&format!("cancelled share {}", output::id(share_id)));
    Ok(())
}

/// Remove `owner` from a record.
pub fn revoke(ctx: &Context, record: &str, owner: &str) -> Result<()> {
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;

    if vault.revoke_owner(&session, record, owner)? {
        output::success(&format!("revoked {}; record {} deleted", owner, output::id(record)));
    } else {
        output::success(&format!("revoked {}", owner));
    }
    Ok(())
}

/// List pending shares of a record.
pub fn pending(ctx: &Context, record: &str, json: bool) -> Result<()> {
    let vault = ctx.vault();
    let session = ctx.login(&vault)?;
    let shares = vault.pending_shares(&session, record)?;

    if json {
        let items: Vec<_> = shares
            .iter()
            .map(|(id, share)| {
                serde_json::json!({
                    "id": id,
                    "record_id": share.record_id,
                    "kind": share.kind,
                    "name": share.name,
                    "created_at": share.created_at,
                })
            })
            .collect();
        let result = serde_json::json!({
            "shares": items,
            "count": shares.len()
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if shares.is_empty() {
        output::dimmed("no pending shares");
    } else {
        output::section(&format!("{} pending shares", shares.len()));
        for (id, share) in &shares {
            output::list_item(&format!(
                "{}  created {}",
                output::id(id),
                share.created_at.format("%Y-%m-%d %H:%M UTC")
            ));
        }
    }
    Ok(())
}
