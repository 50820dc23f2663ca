use anyhow::Result;

use epika::{PlaybackResolver, VideoType};

use super::output::{notify, print_playable};
use super::Context;

pub async fn cmd_play(ctx: &Context, id: &str, video_type: VideoType) -> Result<()> {
    let resolver = PlaybackResolver::from_config(&ctx.client, &ctx.config);

    match resolver.resolve(id, video_type).await {
        Ok(playable) => print_playable(&playable, ctx.json),
        Err(err) => {
            notify(err.notification(), true);
            Err(err.into())
        }
    }
}
