mod common;

use rubric_pdf::fonts::wrap;
use rubric_pdf::layout::{
    self, BOX_FILL, BULLET_MARKER, HEADING_STYLE, LIST_ITEM_STYLE, Placement, RATING_LABEL_STYLE,
    Unit, rating_box_height,
};
use rubric_pdf::model::{ContentBlock, Emphasis, RatingBox};
use rubric_pdf::sink::{DisplayList, DrawCommand, Frame, Sink};
use rubric_pdf::{Assessment, Level, PageGeometry};

fn first_on_each_page(placements: &[Placement]) -> Vec<&Placement> {
    let mut firsts: Vec<&Placement> = Vec::new();
    for p in placements {
        if firsts.last().is_none_or(|f| f.page != p.page) {
            firsts.push(p);
        }
    }
    firsts
}

#[test]
fn many_records_span_several_pages() {
    let (records, assessment) = common::rich_records(20);
    let (pages, report) = common::layout_pages(&records, &assessment);

    assert!(report.page_count > 1, "got {} page(s)", report.page_count);
    assert_eq!(pages.len(), report.page_count);

    // Every record heading appears exactly once, in order.
    let texts = common::all_texts(&pages);
    let mut last = 0;
    for record in &records {
        let pos = texts
            .iter()
            .position(|t| *t == record.domain)
            .unwrap_or_else(|| panic!("missing heading {}", record.domain));
        assert!(pos >= last, "{} out of order", record.domain);
        last = pos;
    }
}

#[test]
fn letterhead_on_every_page() {
    let (records, assessment) = common::rich_records(20);
    let (pages, _) = common::layout_pages(&records, &assessment);
    let expected = PageGeometry::default().letterhead;

    for (i, page) in pages.iter().enumerate() {
        let images: Vec<_> = page.images().collect();
        assert_eq!(images.len(), 1, "page {}", i + 1);
        assert_eq!(images[0].0, common::LETTERHEAD_KEY);
        assert_eq!(*images[0].1, expected);
    }
}

#[test]
fn units_stay_inside_the_content_area() {
    let (records, assessment) = common::rich_records(20);
    let (_, report) = common::layout_pages(&records, &assessment);
    let geometry = PageGeometry::default();

    assert!(!report.placements.is_empty());
    for p in &report.placements {
        assert!(p.top >= geometry.content_top, "{p:?}");
        assert!(p.bottom() <= geometry.bottom_limit + 0.01, "{p:?}");
        assert!(p.page < report.page_count);
    }
}

#[test]
fn content_restarts_below_the_letterhead() {
    let (records, assessment) = common::rich_records(20);
    let (_, report) = common::layout_pages(&records, &assessment);
    let firsts = first_on_each_page(&report.placements);

    assert_eq!(firsts.len(), report.page_count);
    for p in firsts {
        assert_eq!(p.top, PageGeometry::default().content_top, "{p:?}");
    }
}

#[test]
fn placements_move_forward() {
    let (records, assessment) = common::rich_records(20);
    let (_, report) = common::layout_pages(&records, &assessment);

    for pair in report.placements.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            b.page > a.page || (b.page == a.page && b.top > a.top),
            "{a:?} then {b:?}"
        );
        assert!(b.page <= a.page + 1);
    }
}

#[test]
fn only_rated_boxes_are_filled() {
    let records = vec![common::record("Planning"), common::record("Assessment")];
    let mut assessment = Assessment::new();
    assessment.set_rating("Planning", Some(Level::Embedding));

    let (pages, report) = common::layout_pages(&records, &assessment);
    assert_eq!(report.page_count, 1);

    let rects: Vec<_> = pages[0].rects().collect();
    assert_eq!(rects.len(), 1);
    let (frame, fill) = rects[0];
    assert_eq!(fill, BOX_FILL);

    let boxes: Vec<&Placement> = report
        .placements
        .iter()
        .filter(|p| p.unit == Unit::RatingBox)
        .collect();
    assert_eq!(boxes.len(), 2);
    assert_eq!(frame.y, boxes[0].top);
    assert_eq!(frame.height, boxes[0].height);

    let texts = common::all_texts(&pages);
    assert!(texts.contains(&"Rating: Embedding".to_string()));
    assert!(texts.contains(&"Rating: Not rated".to_string()));
}

#[test]
fn box_fill_is_drawn_before_its_label() {
    let records = vec![common::record("Planning")];
    let mut assessment = Assessment::new();
    assessment.set_rating("Planning", Some(Level::Excelling));
    let (pages, _) = common::layout_pages(&records, &assessment);

    let commands = &pages[0].commands;
    let rect_idx = commands
        .iter()
        .position(|c| matches!(c, rubric_pdf::sink::DrawCommand::Rect { .. }))
        .expect("fill");
    let label_idx = commands
        .iter()
        .position(|c| matches!(
            c,
            rubric_pdf::sink::DrawCommand::Text { text, style, .. }
                if text == "Rating: Excelling" && *style == RATING_LABEL_STYLE
        ))
        .expect("label");
    assert!(rect_idx < label_idx);
}

#[test]
fn box_grows_with_its_description() {
    assert_eq!(rating_box_height(0, 40.0), 40.0);
    assert_eq!(rating_box_height(1, 40.0), 40.0);
    assert_eq!(rating_box_height(3, 40.0), 68.0);
    assert!(rating_box_height(10, 40.0) > rating_box_height(9, 40.0));
}

#[test]
fn bullets_carry_a_marker_on_their_first_line() {
    let records = vec![common::record("Planning")];
    let mut assessment = Assessment::new();
    assessment
        .set_rating("Planning", Some(Level::Developing))
        .set_evidence("Planning", "- Used exemplars\n- Book looks");
    let (pages, report) = common::layout_pages(&records, &assessment);

    let bullets: Vec<(String, f32)> = pages[0]
        .commands
        .iter()
        .filter_map(|c| match c {
            rubric_pdf::sink::DrawCommand::Text { text, x, style, .. }
                if *style == LIST_ITEM_STYLE && text.starts_with(BULLET_MARKER) =>
            {
                Some((text.clone(), *x))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        bullets.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>(),
        [
            format!("{BULLET_MARKER}Used exemplars"),
            format!("{BULLET_MARKER}Book looks")
        ]
    );
    assert_eq!(
        report
            .placements
            .iter()
            .filter(|p| p.unit == Unit::Bullet)
            .count(),
        2
    );
    assert_eq!(
        report
            .placements
            .iter()
            .filter(|p| p.unit == Unit::ListTitle)
            .count(),
        1
    );
}

#[test]
fn empty_input_is_one_page_with_letterhead() {
    let (pages, report) = common::layout_pages(&[], &Assessment::new());
    assert_eq!(report.page_count, 1);
    assert!(report.placements.is_empty());
    assert_eq!(pages[0].images().count(), 1);
    assert_eq!(pages[0].texts().count(), 0);
}

#[test]
fn oversize_box_is_split_across_pages() {
    let long = "The school community reflects on its curriculum regularly. ".repeat(120);
    let blocks = vec![
        ContentBlock::Heading("Planning".into()),
        ContentBlock::Rule,
        ContentBlock::HighlightedBox(RatingBox {
            level: Some(Level::Excelling),
            label: "Rating: Excelling".into(),
            description: long,
            min_height: 40.0,
        }),
        ContentBlock::Heading("Assessment".into()),
    ];
    let geometry = PageGeometry::default();
    let mut sink = DisplayList::new();
    let report =
        layout::paginate(&blocks, &mut sink, &geometry, &common::letterhead()).expect("layout");

    let segments: Vec<&Placement> = report
        .placements
        .iter()
        .filter(|p| p.unit == Unit::RatingBoxSegment)
        .collect();
    assert!(segments.len() >= 2, "{segments:?}");
    assert!(segments.windows(2).all(|w| w[1].page == w[0].page + 1));
    assert!(
        !report
            .placements
            .iter()
            .any(|p| p.unit == Unit::RatingBox)
    );
    for s in &segments {
        assert!(s.bottom() <= geometry.bottom_limit + 0.01, "{s:?}");
    }

    // Each segment is filled on its own page; the label is drawn once.
    let pages = sink.export().expect("export");
    for s in &segments {
        assert!(pages[s.page].rects().any(|(f, _)| f.y == s.top));
    }
    let labels = common::all_texts(&pages)
        .iter()
        .filter(|t| *t == "Rating: Excelling")
        .count();
    assert_eq!(labels, 1);

    // The following heading comes after the last segment.
    let heading = report
        .placements
        .iter()
        .filter(|p| p.unit == Unit::Heading)
        .nth(1)
        .expect("second heading");
    let last = segments.last().expect("segment");
    assert!(heading.page >= last.page);
}

#[test]
fn geometry_can_be_customised() {
    let geometry = PageGeometry {
        bottom_limit: 400.0,
        letterhead: Frame::new(20.0, 10.0, 60.0, 20.0),
        ..PageGeometry::default()
    };
    let (records, assessment) = common::rich_records(4);
    let mut sink = DisplayList::new();
    let report = rubric_pdf::layout_summary(
        &records,
        &assessment,
        &common::letterhead(),
        &geometry,
        &mut sink,
    )
    .expect("layout");

    let (_, default_report) = common::layout_pages(&records, &assessment);
    assert!(report.page_count > default_report.page_count);
    for p in &report.placements {
        assert!(p.bottom() <= 400.0 + 0.01, "{p:?}");
    }
    for page in sink.pages() {
        assert_eq!(page.images().next().map(|(_, f)| *f), Some(geometry.letterhead));
    }
}

fn numbered_lines(n: usize) -> String {
    (1..=n)
        .map(|i| format!("Line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn heading_near_the_bottom_moves_with_its_rule() {
    // 40 indicator lines leave the cursor at 708pt: room for a heading line
    // but not for the heading, its rule and a line of text.
    let blocks = vec![
        ContentBlock::Heading("Planning".into()),
        ContentBlock::Rule,
        ContentBlock::Paragraph {
            text: numbered_lines(40),
            emphasis: Emphasis::Regular,
            color: None,
        },
        ContentBlock::Heading("Assessment".into()),
        ContentBlock::Rule,
    ];
    let geometry = PageGeometry::default();
    let mut sink = DisplayList::new();
    let report =
        layout::paginate(&blocks, &mut sink, &geometry, &common::letterhead()).expect("layout");

    assert_eq!(report.page_count, 2);
    let headings: Vec<&Placement> = report
        .placements
        .iter()
        .filter(|p| p.unit == Unit::Heading)
        .collect();
    let rules: Vec<&Placement> = report
        .placements
        .iter()
        .filter(|p| p.unit == Unit::Rule)
        .collect();
    assert_eq!(headings.len(), 2);
    assert_eq!(rules.len(), 2);

    let last_line = report
        .placements
        .iter()
        .filter(|p| p.unit == Unit::TextLine)
        .last()
        .expect("indicator line");
    assert_eq!(last_line.page, 0);

    assert_eq!(headings[1].page, 1);
    assert_eq!(headings[1].top, geometry.content_top);
    assert_eq!(rules[1].page, headings[1].page);
    assert!(rules[1].top > headings[1].top);

    let pages = sink.export().expect("export");
    assert!(pages[1].texts().any(|(t, _, y)| t == "Assessment" && y == geometry.content_top));
}

#[test]
fn wrapped_heading_stays_in_one_piece() {
    let title = "Curriculum leadership and whole school planning ".repeat(3);
    let geometry = PageGeometry::default();
    let lines = wrap(&title, geometry.content_width, HEADING_STYLE.spec());
    assert!(lines.len() > 1);

    let blocks = vec![ContentBlock::Heading(title.clone()), ContentBlock::Rule];
    let mut sink = DisplayList::new();
    let report =
        layout::paginate(&blocks, &mut sink, &geometry, &common::letterhead()).expect("layout");

    let heading = &report.placements[0];
    assert_eq!(heading.unit, Unit::Heading);
    assert_eq!(heading.height, 60.0 + 18.0 * (lines.len() - 1) as f32);
    assert!(report.placements.iter().all(|p| p.page == 0));

    let pages = sink.export().expect("export");
    let baselines: Vec<f32> = pages[0]
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { y, style, .. } if *style == HEADING_STYLE => Some(*y),
            _ => None,
        })
        .collect();
    assert_eq!(baselines.len(), lines.len());
    for (i, y) in baselines.iter().enumerate() {
        assert_eq!(*y, geometry.content_top + 18.0 * i as f32);
    }
}

#[test]
fn heading_taller_than_a_page_flows_across_pages() {
    let title = "Curriculum leadership and whole school planning ".repeat(60);
    let geometry = PageGeometry::default();
    let lines = wrap(&title, geometry.content_width, HEADING_STYLE.spec());
    assert!(60.0 + 18.0 * (lines.len() - 1) as f32 > geometry.usable_height());

    let blocks = vec![ContentBlock::Heading(title.clone()), ContentBlock::Rule];
    let mut sink = DisplayList::new();
    let report =
        layout::paginate(&blocks, &mut sink, &geometry, &common::letterhead()).expect("layout");

    assert!(report.page_count >= 2, "{}", report.page_count);
    for p in &report.placements {
        assert!(p.bottom() <= geometry.bottom_limit + 0.01, "{p:?}");
    }
    assert_eq!(
        report
            .placements
            .iter()
            .filter(|p| p.unit == Unit::Heading)
            .count(),
        1
    );
    assert_eq!(
        report
            .placements
            .iter()
            .filter(|p| p.unit == Unit::HeadingLine)
            .count(),
        lines.len() - 1
    );

    // The rule lands on the page of the heading's last line.
    let last_line = report
        .placements
        .iter()
        .filter(|p| p.unit == Unit::HeadingLine)
        .last()
        .expect("continuation line");
    let rule = report
        .placements
        .iter()
        .find(|p| p.unit == Unit::Rule)
        .expect("rule");
    assert_eq!(rule.page, last_line.page);

    // Every line is drawn, in order, above the bottom limit.
    let pages = sink.export().expect("export");
    let drawn: Vec<(String, f32)> = pages
        .iter()
        .flat_map(|p| p.commands.iter())
        .filter_map(|c| match c {
            DrawCommand::Text { text, y, style, .. } if *style == HEADING_STYLE => {
                Some((text.clone(), *y))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        drawn.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>(),
        lines.iter().map(|l| l.text.as_str()).collect::<Vec<_>>()
    );
    assert!(drawn.iter().all(|(_, y)| *y <= geometry.bottom_limit));
}
