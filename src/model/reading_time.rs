use super::Block;
use crate::constants::READING_WORDS_PER_MINUTE;
use serde::{Deserialize, Serialize};

/// Estimated time to read a post body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: usize,
}

impl ReadingTime {
    /// Counts words across text-bearing blocks and image captions.
    ///
    /// Any non-empty body takes at least a minute, even one made only of
    /// images or dividers.
    pub fn estimate(blocks: &[Block]) -> Self {
        let words: usize = blocks
            .iter()
            .map(|block| match block {
                Block::Image(image) => count_words(&image.caption),
                other => count_words(&other.text()),
            })
            .sum();

        let minutes = if blocks.is_empty() {
            0
        } else {
            words.div_ceil(READING_WORDS_PER_MINUTE).max(1)
        };

        Self { words, minutes }
    }
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockCommon, ImageBlock, ParagraphBlock};
    use crate::types::{BlockId, RichText};

    fn paragraph(id: &str, text: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::new(BlockId::from_remote(id)),
            content: RichText::plain(text),
        })
    }

    #[test]
    fn empty_body_takes_no_time() {
        assert_eq!(
            ReadingTime::estimate(&[]),
            ReadingTime {
                words: 0,
                minutes: 0
            }
        );
    }

    #[test]
    fn short_body_rounds_up_to_a_minute() {
        let blocks = vec![
            paragraph("a", "three little words"),
            Block::Image(ImageBlock {
                common: BlockCommon::new(BlockId::from_remote("b")),
                url: "https://example.com/a.png".to_string(),
                caption: "a caption".to_string(),
            }),
        ];
        let estimate = ReadingTime::estimate(&blocks);
        assert_eq!(estimate.words, 5);
        assert_eq!(estimate.minutes, 1);
    }

    #[test]
    fn wordless_body_still_takes_a_minute() {
        let blocks = vec![Block::Image(ImageBlock {
            common: BlockCommon::new(BlockId::from_remote("a")),
            url: "https://example.com/a.png".to_string(),
            caption: String::new(),
        })];
        assert_eq!(
            ReadingTime::estimate(&blocks),
            ReadingTime {
                words: 0,
                minutes: 1
            }
        );
    }

    #[test]
    fn long_body_scales_with_word_count() {
        let text = vec!["word"; 401].join(" ");
        let estimate = ReadingTime::estimate(&[paragraph("a", &text)]);
        assert_eq!(estimate.minutes, 3);
    }
}
