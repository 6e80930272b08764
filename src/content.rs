use crate::assessment::AssessmentSource;
use crate::model::{ContentBlock, Emphasis, RatingBox, RubricRecord, rating_label};

pub const EVIDENCE_TITLE: &str = "Evidence:";
pub const NEXT_STEPS_TITLE: &str = "Next Steps:";

/// Smallest height of a rating box, whatever its description length.
pub const RATING_BOX_MIN_HEIGHT: f32 = 40.0;

/// Turn rubric records and their assessment into the ordered blocks the
/// paginator lays out. Records without a domain are skipped.
pub fn build<A>(records: &[RubricRecord], assessment: &A) -> Vec<ContentBlock>
where
    A: AssessmentSource + ?Sized,
{
    let mut blocks = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        if !record.has_domain() {
            log::debug!("rubric row {idx}: no domain, skipped");
            continue;
        }
        let domain = record.domain.as_str();
        let rating = assessment.rating(domain);

        blocks.push(ContentBlock::Heading(domain.to_string()));
        blocks.push(ContentBlock::Rule);
        blocks.push(ContentBlock::Paragraph {
            text: format!("Indicators: {}", record.indicators),
            emphasis: Emphasis::Regular,
            color: None,
        });
        blocks.push(ContentBlock::HighlightedBox(RatingBox {
            level: rating,
            label: format!("Rating: {}", rating_label(rating)),
            description: rating
                .map(|level| record.description(level).to_string())
                .unwrap_or_default(),
            min_height: RATING_BOX_MIN_HEIGHT,
        }));

        let sections = [
            (EVIDENCE_TITLE, assessment.evidence(domain)),
            (NEXT_STEPS_TITLE, assessment.next_steps(domain)),
        ];
        for (title, text) in sections {
            if text.trim().is_empty() {
                continue;
            }
            blocks.push(ContentBlock::BulletList {
                title: title.to_string(),
                items: bullet_items(text),
            });
        }
    }

    blocks
}

/// Split an annotation into bullet items: one per non-blank line, with any
/// leading markdown list marker removed.
pub fn bullet_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .map(|line| {
            ["- ", "* ", "+ "]
                .iter()
                .find_map(|marker| line.strip_prefix(marker))
                .map_or(line, str::trim_start)
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
