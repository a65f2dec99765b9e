//! Packet-level container copy: remux, clip and mux.
//!
//! All three operations move compressed packets between containers without
//! touching the payload bytes; only timestamps are rescaled (and, for
//! clips, re-anchored). The output container format is inferred from the
//! output path's extension by the FFmpeg muxer.

use crate::{Error, Result, TimeWindow};
use ffmpeg_the_third as ffmpeg;
use std::path::Path;
use std::sync::Once;

static FFMPEG_INIT: Once = Once::new();

fn init_ffmpeg() {
    FFMPEG_INIT.call_once(|| {
        ffmpeg::init().expect("Failed to initialize FFmpeg");
    });
}

/// Per-stream retiming state, private to one copy pass.
#[derive(Debug, Clone, Copy)]
struct StreamCursor {
    /// First decode timestamp seen after the window start; the anchor the
    /// clip timeline is rebased against.
    first_dts: Option<i64>,
    /// Last seen presentation time, in seconds.
    last_time: f64,
}

impl StreamCursor {
    fn new() -> Self {
        Self {
            first_dts: None,
            last_time: 0.0,
        }
    }
}

/// Re-anchor a packet onto a clip-local timeline starting at zero.
///
/// Keeps the packet's PTS/DTS offset intact while shifting the DTS back by
/// the first DTS observed on the stream. A standalone clip file must start
/// at zero regardless of the source's absolute timestamps.
fn rebase_timestamps(pts: i64, dts: i64, first_dts: i64) -> (i64, i64) {
    (pts - (first_dts - (pts - dts)), dts - first_dts)
}

/// True once every stream's last seen presentation time has crossed the
/// window end. Streams interleave, so one stream crossing the boundary is
/// not enough; the slowest stream decides when to stop reading.
fn all_streams_past_end(window: &TimeWindow, cursors: &[StreamCursor]) -> bool {
    window.end() != 0.0 && cursors.iter().all(|c| c.last_time > window.end())
}

fn packet_seconds(packet: &ffmpeg::Packet, time_base: ffmpeg::Rational) -> f64 {
    let ts = packet.pts().or(packet.dts()).unwrap_or(0);
    ts as f64 * f64::from(time_base)
}

/// Copy a container to a new format without re-encoding.
///
/// One output stream is created per input stream with identical codec
/// parameters; every packet is copied with its timestamps rescaled to the
/// output stream's time base.
pub fn remux(input: &Path, output: &Path) -> Result<()> {
    copy_windowed(input, output, TimeWindow::FULL)
}

/// Copy the `window` sub-interval of a container into a standalone file.
///
/// Seeking lands on the nearest preceding sync point and packets are not
/// re-encoded, so clip boundaries may be off by a small amount and the
/// first frames after the cut may repeat until the next sync point. This
/// is an accepted approximation of lossless cutting, not a defect.
pub fn clip(input: &Path, output: &Path, window: TimeWindow) -> Result<()> {
    copy_windowed(input, output, window)
}

fn copy_windowed(input: &Path, output: &Path, window: TimeWindow) -> Result<()> {
    init_ffmpeg();

    tracing::debug!(
        start = window.start(),
        end = window.end(),
        "copying {:?} -> {:?}",
        input,
        output
    );

    let mut ictx = ffmpeg::format::input(input).map_err(|e| Error::open(input, e))?;
    let mut octx = ffmpeg::format::output(output).map_err(|e| Error::open(output, e))?;

    let mut input_time_bases: Vec<ffmpeg::Rational> = Vec::new();
    let mut cursors: Vec<StreamCursor> = Vec::new();

    for istream in ictx.streams() {
        let mut ostream = octx
            .add_stream(ffmpeg::encoder::find(ffmpeg::codec::Id::None))
            .map_err(Error::StreamCreation)?;
        ostream.set_parameters(istream.parameters());

        // Reset codec_tag so the output muxer selects a tag valid for its
        // own container format.
        unsafe {
            (*(*ostream.as_mut_ptr()).codecpar).codec_tag = 0;
        }

        input_time_bases.push(istream.time_base());
        cursors.push(StreamCursor::new());
    }

    octx.set_metadata(ictx.metadata().to_owned());

    if window.start() > 0.0 {
        let position = (window.start() * f64::from(ffmpeg::ffi::AV_TIME_BASE)) as i64;
        ictx.seek(position, ..position).map_err(Error::Seek)?;
    }

    octx.write_header().map_err(Error::Write)?;

    for result in ictx.packets() {
        let (stream, mut packet) = result?;
        let index = stream.index();
        let input_time_base = input_time_bases[index];

        let seconds = packet_seconds(&packet, input_time_base);
        cursors[index].last_time = seconds;

        // Packets past the end bound are dropped, but reading goes on until
        // every stream has caught up past the boundary.
        if !window.is_past_end(seconds) {
            if cursors[index].first_dts.is_none() {
                cursors[index].first_dts = packet.dts();
            }
            if !window.is_full() {
                if let (Some(pts), Some(dts), Some(first_dts)) =
                    (packet.pts(), packet.dts(), cursors[index].first_dts)
                {
                    let (pts, dts) = rebase_timestamps(pts, dts, first_dts);
                    packet.set_pts(Some(pts));
                    packet.set_dts(Some(dts));
                }
            }

            let output_time_base = octx
                .stream(index)
                .map(|s| s.time_base())
                .unwrap_or(input_time_base);
            packet.rescale_ts(input_time_base, output_time_base);
            packet.set_position(-1);
            packet.set_stream(index);
            packet.write_interleaved(&mut octx).map_err(Error::Write)?;
        }

        if all_streams_past_end(&window, &cursors) {
            break;
        }
    }

    octx.write_trailer().map_err(Error::Write)?;

    tracing::info!("copy complete: {:?}", output);
    Ok(())
}

/// Combine a video-only and an audio-only container into one file.
///
/// The first video stream of `video_input` and the first audio stream of
/// `audio_input` become the output's two streams. Packets are pulled one
/// from each source in turn until both are exhausted; the interleave is
/// plain round-robin, not a timestamp-ordered merge, relying on the output
/// muxer's own buffering to produce a valid file. Timestamps are not
/// re-anchored since both inputs are assumed to start at their own zero.
pub fn mux(video_input: &Path, audio_input: &Path, output: &Path) -> Result<()> {
    init_ffmpeg();

    tracing::debug!(
        "muxing {:?} + {:?} -> {:?}",
        video_input,
        audio_input,
        output
    );

    let mut vctx = ffmpeg::format::input(video_input).map_err(|e| Error::open(video_input, e))?;
    let mut actx = ffmpeg::format::input(audio_input).map_err(|e| Error::open(audio_input, e))?;

    let (video_time_base, video_params) =
        find_stream(&vctx, ffmpeg::media::Type::Video).ok_or_else(|| Error::NoVideoStream {
            path: video_input.to_path_buf(),
        })?;
    let (audio_time_base, audio_params) =
        find_stream(&actx, ffmpeg::media::Type::Audio).ok_or_else(|| Error::NoAudioStream {
            path: audio_input.to_path_buf(),
        })?;

    let mut octx = ffmpeg::format::output(output).map_err(|e| Error::open(output, e))?;
    let video_out = add_copy_stream(&mut octx, video_params)?;
    let audio_out = add_copy_stream(&mut octx, audio_params)?;

    octx.write_header().map_err(Error::Write)?;

    let mut video_packets = vctx.packets();
    let mut audio_packets = actx.packets();
    let mut video_done = false;
    let mut audio_done = false;

    while !video_done || !audio_done {
        if !video_done {
            match video_packets.next() {
                Some(result) => {
                    let (_, packet) = result?;
                    write_retimed(&mut octx, packet, video_time_base, video_out)?;
                }
                None => video_done = true,
            }
        }
        if !audio_done {
            match audio_packets.next() {
                Some(result) => {
                    let (_, packet) = result?;
                    write_retimed(&mut octx, packet, audio_time_base, audio_out)?;
                }
                None => audio_done = true,
            }
        }
    }

    octx.write_trailer().map_err(Error::Write)?;

    tracing::info!("mux complete: {:?}", output);
    Ok(())
}

/// Locate the first stream of `medium` in an input, returning its time
/// base and codec parameters.
fn find_stream(
    ctx: &ffmpeg::format::context::Input,
    medium: ffmpeg::media::Type,
) -> Option<(ffmpeg::Rational, ffmpeg::codec::Parameters)> {
    for stream in ctx.streams() {
        let Ok(codec) = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
        else {
            continue;
        };
        if codec.medium() == medium {
            return Some((stream.time_base(), ffmpeg::codec::Parameters::from(codec.decoder())));
        }
    }
    None
}

fn add_copy_stream(
    octx: &mut ffmpeg::format::context::Output,
    parameters: ffmpeg::codec::Parameters,
) -> Result<usize> {
    let mut ostream = octx
        .add_stream(ffmpeg::encoder::find(ffmpeg::codec::Id::None))
        .map_err(Error::StreamCreation)?;
    ostream.set_parameters(parameters);
    unsafe {
        (*(*ostream.as_mut_ptr()).codecpar).codec_tag = 0;
    }
    Ok(ostream.index())
}

fn write_retimed(
    octx: &mut ffmpeg::format::context::Output,
    mut packet: ffmpeg::Packet,
    input_time_base: ffmpeg::Rational,
    out_index: usize,
) -> Result<()> {
    let output_time_base = octx
        .stream(out_index)
        .map(|s| s.time_base())
        .ok_or(Error::Ffmpeg(ffmpeg::Error::StreamNotFound))?;
    packet.rescale_ts(input_time_base, output_time_base);
    packet.set_position(-1);
    packet.set_stream(out_index);
    packet.write_interleaved(octx).map_err(Error::Write)
}
