pub mod browse;
pub mod output;
pub mod play;

use anyhow::Result;
use epika::{Action, Config, EpikaClient, VideoType};

/// Everything a command needs for one invocation.
pub struct Context {
    pub config: Config,
    pub client: EpikaClient,
    pub json: bool,
}

/// Run one routed action, exactly as a host would on navigation.
pub async fn dispatch(ctx: &Context, action: Action) -> Result<()> {
    match action {
        Action::Root => browse::cmd_root(ctx),
        Action::Categories { category } => browse::cmd_subcategories(ctx, category).await,
        Action::Listing {
            category,
            subcategory,
        } => browse::cmd_videos(ctx, category, subcategory).await,
        Action::Serial { video_id, .. } => browse::cmd_seasons(ctx, video_id).await,
        Action::Episodes {
            serial_id,
            season_id,
        } => browse::cmd_episodes(ctx, serial_id, season_id).await,
        Action::Play { video } => play::cmd_play(ctx, &video, VideoType::Movie).await,
    }
}
