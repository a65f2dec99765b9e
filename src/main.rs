mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use mediagrab::pipeline;
use mediagrab_av::TimeWindow;
use mediagrab_fetch::Downloader;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediagrab=trace,mediagrab_fetch=trace,mediagrab_av=trace".to_string()
        } else {
            "mediagrab=info,mediagrab_fetch=info,mediagrab_av=info".to_string()
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Fetch {
            url,
            output,
            expect_size,
            mime,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let downloader = Downloader::new()?;
                pipeline::fetch_to_file(&downloader, &url, &output, expect_size, mime.as_deref())
                    .await
            })
        }
        Commands::Remux { input, output } => {
            mediagrab_av::remux(&input, &output)?;
            println!("Remuxed to {}", output.display());
            Ok(())
        }
        Commands::Clip {
            input,
            output,
            start,
            end,
        } => {
            let window = TimeWindow::new(start, end.unwrap_or(0.0))?;
            mediagrab_av::clip(&input, &output, window)?;
            println!("Clipped to {}", output.display());
            Ok(())
        }
        Commands::Split {
            input,
            duration,
            clip_len,
            skip_start,
            skip_end,
        } => {
            let clips =
                mediagrab_av::split_into_clips(&input, duration, clip_len, skip_start, skip_end)?;
            for clip in &clips {
                println!("{}", clip.display());
            }
            println!("Total clips: {}", clips.len());
            Ok(())
        }
        Commands::Mux {
            video,
            audio,
            output,
        } => {
            mediagrab_av::mux(&video, &audio, &output)?;
            println!("Muxed to {}", output.display());
            Ok(())
        }
        Commands::FetchMux {
            video_url,
            video_mime,
            audio_url,
            audio_mime,
            output,
            stem,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let downloader = Downloader::new()?;
                pipeline::fetch_and_mux(
                    &downloader,
                    &video_url,
                    video_mime.as_deref(),
                    &audio_url,
                    audio_mime.as_deref(),
                    &stem,
                    &output,
                )
                .await
            })
        }
    }
}
