/*!
 * Caption segmentation and encoding.
 *
 * A shared segmenter groups word timings into display lines; two independent
 * encoders consume the segments: a plain SRT encoder and a word-highlighted
 * ASS karaoke encoder.
 */

pub mod ass;
pub mod segmenter;
pub mod srt;

pub use segmenter::{segment_words, LineSegment};
