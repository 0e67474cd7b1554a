//! Property tests for layout geometry, row flow and label formatting.

use proptest::prelude::*;

use vitae::canvas::{Canvas, Margins, PageSetup, PageSize, PdfCanvas, Unit};
use vitae::font::{FontFamily, FontStyle};
use vitae::layout::{content_height, content_width, interest_sentence, render_row, RowStyle};
use vitae::model::{year_range, PartialDate};

// ─── Strategies ─────────────────────────────────────────────────

fn page_size() -> impl Strategy<Value = PageSize> {
    prop_oneof![
        Just(PageSize::A4),
        Just(PageSize::A3),
        Just(PageSize::A5),
        Just(PageSize::Letter),
        Just(PageSize::Legal),
    ]
}

fn margins() -> impl Strategy<Value = Margins> {
    (0.0f64..40.0, 0.0f64..40.0, 0.0f64..40.0, 0.0f64..40.0).prop_map(
        |(left, top, right, bottom)| Margins {
            left,
            top,
            right,
            bottom,
        },
    )
}

fn canvas_for(size: PageSize, margins: Margins) -> PdfCanvas {
    let setup = PageSetup {
        size,
        unit: Unit::Mm,
        margins,
        break_margin: 20.0,
    };
    let mut canvas = PdfCanvas::new(setup);
    canvas.set_font(FontFamily::Helvetica, FontStyle::REGULAR, 11.0);
    canvas
}

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,12}", 0..30).prop_map(|w| w.join(" "))
}

// ─── Geometry ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn content_box_matches_page_minus_margins(size in page_size(), margins in margins()) {
        let canvas = canvas_for(size, margins);
        let (width, height) = canvas.page_size();
        let cw = content_width(&canvas);
        let ch = content_height(&canvas);
        prop_assert!((cw - (width - margins.left - margins.right)).abs() < 1e-9);
        prop_assert!((ch - (height - margins.top - margins.bottom)).abs() < 1e-9);
        // asking twice gives the same answer
        prop_assert_eq!(cw, content_width(&canvas));
        prop_assert_eq!(ch, content_height(&canvas));
    }

    // ─── Rows ───────────────────────────────────────────────────

    #[test]
    fn rows_move_down_and_restore_x(
        label in "[A-Za-z0-9 ]{0,10}",
        content in words(),
        ratio in 0.0f64..0.9,
        row_height in 4.0f64..8.0,
    ) {
        let mut canvas = canvas_for(PageSize::A4, Margins::uniform(10.0));
        let x = canvas.x();
        let y = canvas.y();
        let before = canvas.font();

        render_row(&mut canvas, &label, &content, RowStyle::PLAIN, ratio, row_height);

        prop_assume!(canvas.pages().len() == 1);
        prop_assert!(canvas.y() >= y);
        if ratio > 0.0 {
            prop_assert!(canvas.y() >= y + row_height - 1e-9);
        }
        prop_assert!((canvas.x() - x).abs() < 1e-9);
        prop_assert_eq!(canvas.font(), before);
    }

    #[test]
    fn consecutive_rows_never_overlap(
        contents in prop::collection::vec(words(), 1..6),
        ratio in 0.0f64..0.9,
    ) {
        let mut canvas = canvas_for(PageSize::A4, Margins::uniform(10.0));
        let mut last = canvas.y();
        for content in &contents {
            render_row(&mut canvas, "2020-", content, RowStyle::PLAIN, ratio, 6.0);
            prop_assume!(canvas.pages().len() == 1);
            prop_assert!(canvas.y() >= last);
            last = canvas.y();
        }
    }

    // ─── Labels ─────────────────────────────────────────────────

    #[test]
    fn interest_sentence_shape(names in prop::collection::vec("[A-Z][a-z]{0,9}", 1..8)) {
        let sentence = interest_sentence(names.as_slice()).unwrap();
        prop_assert!(sentence.starts_with("I love "));
        prop_assert!(sentence.ends_with('.'));
        let ands = sentence.matches(" and ").count();
        prop_assert_eq!(ands, usize::from(names.len() > 1));
        for name in &names {
            prop_assert!(sentence.contains(name.as_str()));
        }
    }

    #[test]
    fn year_range_uses_leading_year(
        start in 1900i32..2100,
        end in 1900i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let start_date: PartialDate = format!("{:04}-{:02}-{:02}", start, month, day).parse().unwrap();
        let end_date: PartialDate = format!("{:04}-{:02}", end, month).parse().unwrap();
        prop_assert_eq!(
            year_range(Some(&start_date), Some(&end_date)),
            format!("{}-{}", start, end)
        );
        prop_assert_eq!(year_range(Some(&start_date), None), format!("{}-", start));
        prop_assert_eq!(year_range(None, Some(&end_date)), "");
    }
}
