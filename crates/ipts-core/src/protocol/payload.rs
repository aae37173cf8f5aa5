//! Parser for the body of a `PAYLOAD` frame.
//!
//! Layout (all little-endian):
//! ```text
//! payload       [counter:4][frames:4][reserved:4] frame*
//! frame         [index:2][type:2][size:4][reserved:8] report*   (size bytes)
//! report        [type:2][size:2][data:size]
//! stylus report [elements:1][reserved:3][serial:4] sample*
//! ```
//!
//! A payload frame groups reports of one family.  Stylus frames (`0x6`) carry
//! stylus reports; touch frames (`0x8`) carry a heatmap-dimensions report
//! followed by the heatmap itself.  Frame and report types that are not
//! listed here are skipped using their declared size.
//!
//! Every length field is checked against the bytes that are actually
//! available, so a corrupt size produces [`DecodeError::Truncated`] rather
//! than a panic.

use tracing::trace;

use crate::domain::{
    Heatmap, HeatmapDimensions, StylusMode, StylusReport, StylusSample,
};
use crate::protocol::bytes::{read_u16, read_u32, read_u8, section};
use crate::protocol::error::DecodeError;

// ── Wire constants ────────────────────────────────────────────────────────────

pub const PAYLOAD_HEADER_SIZE: usize = 12;
pub const PAYLOAD_FRAME_HEADER_SIZE: usize = 16;
pub const REPORT_HEADER_SIZE: usize = 4;
pub const STYLUS_REPORT_HEADER_SIZE: usize = 8;
pub const STYLUS_SAMPLE_V1_SIZE: usize = 12;
pub const STYLUS_SAMPLE_V2_SIZE: usize = 16;
pub const HEATMAP_DIMENSIONS_SIZE: usize = 8;

pub const FRAME_TYPE_STYLUS: u16 = 0x6;
pub const FRAME_TYPE_TOUCH: u16 = 0x8;

pub const REPORT_TYPE_STYLUS_V1: u16 = 0x10;
pub const REPORT_TYPE_STYLUS_V2: u16 = 0x60;
pub const REPORT_TYPE_HEATMAP_DIMENSIONS: u16 = 0x403;
pub const REPORT_TYPE_HEATMAP: u16 = 0x425;

/// V1 pressure is 10-bit; v2 is 12-bit.
const V1_PRESSURE_SCALE: u16 = 4;

// ── Parsed values ─────────────────────────────────────────────────────────────

/// One event extracted from a payload, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadEvent {
    Stylus(StylusReport),
    Heatmap(Heatmap),
}

/// Everything decoded from a single `PAYLOAD` frame body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadData {
    /// Device-side frame counter.
    pub counter: u32,
    pub events: Vec<PayloadEvent>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parses a `PAYLOAD` frame body into stylus reports and heatmaps.
///
/// # Errors
///
/// Returns [`DecodeError::Truncated`] when any declared length runs past the
/// end of `body`, and [`DecodeError::MissingHeatmapDimensions`] when a touch
/// frame sends heatmap data before its dimensions.
pub fn parse_payload(body: &[u8]) -> Result<PayloadData, DecodeError> {
    let header = section(body, 0, PAYLOAD_HEADER_SIZE, "payload header")?;
    let counter = read_u32(header, 0, "payload counter")?;
    let frame_count = read_u32(header, 4, "payload frame count")?;

    let mut events = Vec::new();
    let mut off = PAYLOAD_HEADER_SIZE;

    for _ in 0..frame_count {
        let frame_header = section(body, off, PAYLOAD_FRAME_HEADER_SIZE, "payload frame header")?;
        let index = read_u16(frame_header, 0, "payload frame index")?;
        let frame_type = read_u16(frame_header, 2, "payload frame type")?;
        let size = read_u32(frame_header, 4, "payload frame size")? as usize;

        let data_off = off + PAYLOAD_FRAME_HEADER_SIZE;
        let data = section(body, data_off, size, "payload frame data")?;

        match frame_type {
            FRAME_TYPE_STYLUS => parse_stylus_frame(data, &mut events)?,
            FRAME_TYPE_TOUCH => parse_touch_frame(data, &mut events)?,
            other => trace!(index, frame_type = other, "skipping payload frame"),
        }

        off = data_off + size;
    }

    Ok(PayloadData { counter, events })
}

// ── Frame parsers ─────────────────────────────────────────────────────────────

fn parse_stylus_frame(data: &[u8], events: &mut Vec<PayloadEvent>) -> Result<(), DecodeError> {
    for_each_report(data, |report_type, report| {
        match report_type {
            REPORT_TYPE_STYLUS_V1 => {
                events.push(PayloadEvent::Stylus(parse_stylus_report(report, StylusLayout::V1)?));
            }
            REPORT_TYPE_STYLUS_V2 => {
                events.push(PayloadEvent::Stylus(parse_stylus_report(report, StylusLayout::V2)?));
            }
            other => trace!(report_type = other, "skipping stylus frame report"),
        }
        Ok(())
    })
}

fn parse_touch_frame(data: &[u8], events: &mut Vec<PayloadEvent>) -> Result<(), DecodeError> {
    // Dimensions only apply to heatmaps later in the same frame.
    let mut dimensions: Option<HeatmapDimensions> = None;

    for_each_report(data, |report_type, report| {
        match report_type {
            REPORT_TYPE_HEATMAP_DIMENSIONS => {
                dimensions = Some(parse_heatmap_dimensions(report)?);
            }
            REPORT_TYPE_HEATMAP => {
                let dims = dimensions.ok_or(DecodeError::MissingHeatmapDimensions)?;
                let cells = section(report, 0, dims.cell_count(), "heatmap data")?;
                events.push(PayloadEvent::Heatmap(Heatmap {
                    dimensions: dims,
                    data: cells.to_vec(),
                }));
            }
            other => trace!(report_type = other, "skipping touch frame report"),
        }
        Ok(())
    })
}

/// Walks the `[type:2][size:2][data]` reports packed into a frame.
fn for_each_report<F>(data: &[u8], mut f: F) -> Result<(), DecodeError>
where
    F: FnMut(u16, &[u8]) -> Result<(), DecodeError>,
{
    let mut off = 0;
    while off < data.len() {
        let header = section(data, off, REPORT_HEADER_SIZE, "report header")?;
        let report_type = read_u16(header, 0, "report type")?;
        let size = read_u16(header, 2, "report size")? as usize;
        let report = section(data, off + REPORT_HEADER_SIZE, size, "report data")?;

        f(report_type, report)?;

        off += REPORT_HEADER_SIZE + size;
    }
    Ok(())
}

// ── Report parsers ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum StylusLayout {
    V1,
    V2,
}

impl StylusLayout {
    fn sample_size(self) -> usize {
        match self {
            StylusLayout::V1 => STYLUS_SAMPLE_V1_SIZE,
            StylusLayout::V2 => STYLUS_SAMPLE_V2_SIZE,
        }
    }
}

fn parse_stylus_report(report: &[u8], layout: StylusLayout) -> Result<StylusReport, DecodeError> {
    let elements = read_u8(report, 0, "stylus report header")? as usize;
    let serial = read_u32(report, 4, "stylus report header")?;

    let sample_size = layout.sample_size();
    let samples_bytes = section(
        report,
        STYLUS_REPORT_HEADER_SIZE,
        elements * sample_size,
        "stylus report samples",
    )?;

    let samples = samples_bytes
        .chunks_exact(sample_size)
        .map(|s| match layout {
            StylusLayout::V1 => parse_sample_v1(s),
            StylusLayout::V2 => parse_sample_v2(s),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StylusReport { serial, samples })
}

fn parse_sample_v1(s: &[u8]) -> Result<StylusSample, DecodeError> {
    // [reserved:4][mode:1][x:2][y:2][pressure:2][reserved:1]
    Ok(StylusSample {
        timestamp: 0,
        mode: StylusMode(read_u8(s, 4, "stylus v1 mode")? as u16),
        x: read_u16(s, 5, "stylus v1 x")?,
        y: read_u16(s, 7, "stylus v1 y")?,
        pressure: read_u16(s, 9, "stylus v1 pressure")?.saturating_mul(V1_PRESSURE_SCALE),
        altitude: 0,
        azimuth: 0,
    })
}

fn parse_sample_v2(s: &[u8]) -> Result<StylusSample, DecodeError> {
    // [timestamp:2][mode:2][x:2][y:2][pressure:2][altitude:2][azimuth:2][reserved:2]
    Ok(StylusSample {
        timestamp: read_u16(s, 0, "stylus v2 timestamp")?,
        mode: StylusMode(read_u16(s, 2, "stylus v2 mode")?),
        x: read_u16(s, 4, "stylus v2 x")?,
        y: read_u16(s, 6, "stylus v2 y")?,
        pressure: read_u16(s, 8, "stylus v2 pressure")?,
        altitude: read_u16(s, 10, "stylus v2 altitude")?,
        azimuth: read_u16(s, 12, "stylus v2 azimuth")?,
    })
}

fn parse_heatmap_dimensions(report: &[u8]) -> Result<HeatmapDimensions, DecodeError> {
    let d = section(report, 0, HEATMAP_DIMENSIONS_SIZE, "heatmap dimensions")?;
    Ok(HeatmapDimensions {
        height: d[0],
        width: d[1],
        y_min: d[2],
        y_max: d[3],
        x_min: d[4],
        x_max: d[5],
        z_min: d[6],
        z_max: d[7],
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
