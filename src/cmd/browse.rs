use anyhow::Result;

use epika::listing::{self, Listing};
use epika::ListingError;

use super::output::{notify, print_listing};
use super::Context;

/// Show a listing, or notify and show an empty one. Never fails on
/// upstream problems; only on output errors.
fn present(result: Result<Listing, ListingError>, title: &str, json: bool) -> Result<()> {
    match result {
        Ok(listing) => print_listing(&listing, json),
        Err(err) => {
            notify(&err.notification(), err.is_failure());
            print_listing(&Listing::empty(title), json)
        }
    }
}

pub fn cmd_root(ctx: &Context) -> Result<()> {
    print_listing(&listing::root(), ctx.json)
}

pub async fn cmd_subcategories(ctx: &Context, category: u64) -> Result<()> {
    let result = listing::subcategories(&ctx.client, category).await;
    present(result, "Categories", ctx.json)
}

pub async fn cmd_videos(ctx: &Context, category: u64, subcategory: u64) -> Result<()> {
    let result = listing::videos(&ctx.client, &ctx.config, category, subcategory).await;
    present(result, "Videos", ctx.json)
}

pub async fn cmd_seasons(ctx: &Context, serial_id: u64) -> Result<()> {
    let result = listing::seasons(&ctx.client, serial_id).await;
    present(result, "Seasons", ctx.json)
}

pub async fn cmd_episodes(ctx: &Context, serial_id: u64, season_id: u64) -> Result<()> {
    let result = listing::episodes(&ctx.client, serial_id, season_id).await;
    present(result, "Episodes", ctx.json)
}
