//! # Video duration
//!
//! The upload gate needs a video's duration before anything is sent. In the
//! browser the `ui` crate measures it with an off-DOM `<video>` element; on
//! native targets (and in tests) [`Mp4Duration`] reads the movie header (`mvhd`)
//! straight out of the file bytes.

use std::future::Future;

use crate::remote::MediaFile;

/// Measures the playing time of a video file.
pub trait DurationSource {
    /// Duration in seconds, or `None` when it can not be determined.
    fn duration_secs(&self, file: &MediaFile) -> impl Future<Output = Option<f64>>;
}

/// Reads the duration from an ISO-BMFF (MP4/MOV) `moov/mvhd` box.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mp4Duration;

impl DurationSource for Mp4Duration {
    async fn duration_secs(&self, file: &MediaFile) -> Option<f64> {
        mp4_duration_secs(&file.bytes)
    }
}

/// Duration recorded in the movie header of `data`.
pub fn mp4_duration_secs(data: &[u8]) -> Option<f64> {
    let moov = find_box(data, b"moov")?;
    let mvhd = find_box(moov, b"mvhd")?;
    let version = *mvhd.first()?;
    // Skip version + flags, then creation and modification times.
    let (timescale, duration) = match version {
        0 => (read_u32(mvhd, 12)?, u64::from(read_u32(mvhd, 16)?)),
        1 => (read_u32(mvhd, 20)?, read_u64(mvhd, 24)?),
        _ => return None,
    };
    if timescale == 0 {
        return None;
    }
    Some(duration as f64 / f64::from(timescale))
}

/// Payload of the first box of type `kind` at this nesting level.
fn find_box<'a>(mut data: &'a [u8], kind: &[u8; 4]) -> Option<&'a [u8]> {
    while data.len() >= 8 {
        let size = read_u32(data, 0)? as usize;
        let box_type = data.get(4..8)?;
        let (header, total) = match size {
            0 => (8, data.len()),
            1 => (16, usize::try_from(read_u64(data, 8)?).ok()?),
            n => (8, n),
        };
        if total < header || total > data.len() {
            return None;
        }
        if box_type == kind {
            return data.get(header..total);
        }
        data = &data[total..];
    }
    None
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at + 4)?;
    Some(u32::from_be_bytes(bytes.try_into().ok()?))
}

fn read_u64(data: &[u8], at: usize) -> Option<u64> {
    let bytes = data.get(at..at + 8)?;
    Some(u64::from_be_bytes(bytes.try_into().ok()?))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn boxed(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(payload);
        out
    }

    /// A minimal MP4 whose movie header says `secs` long.
    pub(crate) fn fake_mp4(secs: u32) -> Vec<u8> {
        let timescale = 1000u32;
        let mut mvhd = vec![0u8; 4]; // version 0, flags
        mvhd.extend_from_slice(&0u32.to_be_bytes()); // creation
        mvhd.extend_from_slice(&0u32.to_be_bytes()); // modification
        mvhd.extend_from_slice(&timescale.to_be_bytes());
        mvhd.extend_from_slice(&(secs * timescale).to_be_bytes());
        mvhd.extend_from_slice(&[0u8; 80]);

        let mut file = boxed(b"ftyp", b"isom\0\0\0\0isomiso2");
        file.extend(boxed(b"moov", &boxed(b"mvhd", &mvhd)));
        file
    }

    #[test]
    fn test_reads_version_zero_header() {
        assert_eq!(mp4_duration_secs(&fake_mp4(12)), Some(12.0));
        assert_eq!(mp4_duration_secs(&fake_mp4(31)), Some(31.0));
    }

    #[test]
    fn test_reads_version_one_header() {
        let mut mvhd = vec![1u8, 0, 0, 0];
        mvhd.extend_from_slice(&0u64.to_be_bytes());
        mvhd.extend_from_slice(&0u64.to_be_bytes());
        mvhd.extend_from_slice(&600u32.to_be_bytes());
        mvhd.extend_from_slice(&(600u64 * 45).to_be_bytes());
        let file = boxed(b"moov", &boxed(b"mvhd", &mvhd));
        assert_eq!(mp4_duration_secs(&file), Some(45.0));
    }

    #[test]
    fn test_garbage_has_no_duration() {
        assert_eq!(mp4_duration_secs(b""), None);
        assert_eq!(mp4_duration_secs(b"definitely not a movie"), None);
        // Box claims more bytes than exist.
        let mut truncated = fake_mp4(5);
        truncated.truncate(30);
        assert_eq!(mp4_duration_secs(&truncated), None);
    }

    #[tokio::test]
    async fn test_mp4_duration_uses_file_bytes() {
        let file = MediaFile::new("clip.mp4", "video/mp4", fake_mp4(8));
        assert_eq!(Mp4Duration.duration_secs(&file).await, Some(8.0));
    }
}
