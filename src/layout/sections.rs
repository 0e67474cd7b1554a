//! Section bodies: summary, skills and interests, education and courses,
//! work, and the optional credit line.

use super::{content_width, render_row, Composer, LayoutBudget, RowStyle, HEADING_SIZE};
use crate::canvas::{Border, Canvas, Cell, NewLine};
use crate::font::FontStyle;
use crate::model::{year_range, year_span, Resume};
use crate::observer::Notice;

/// Attribution appended by [`ComposeOptions::include_credit`](super::ComposeOptions).
pub const CREDIT_MARKUP: &str = "<i>Generated with Aaron Malpas' CV generator \
     (<a href=\"https://github.com/malpas/amcvgen\">github.com/malpas/amcvgen</a>)</i>";

/// Label column share for dated rows.
const DATE_RATIO: f64 = 0.14;
const SKILL_RATIO: f64 = 0.5;

/// Course and interest lines are a little tighter than table rows.
const LIST_SPACING: f64 = 1.1;

/// `"I love A, B and C."`. `None` when there are no names.
pub fn interest_sentence<S: AsRef<str>>(names: &[S]) -> Option<String> {
    let (last, rest) = names.split_last()?;
    let mut sentence = String::from("I love ");
    if !rest.is_empty() {
        let joined: Vec<&str> = rest.iter().map(|n| n.as_ref()).collect();
        sentence.push_str(&joined.join(", "));
        sentence.push_str(" and ");
    }
    sentence.push_str(last.as_ref());
    sentence.push('.');
    Some(sentence)
}

impl<'a, C: Canvas + ?Sized> Composer<'a, C> {
    /// Bold title over a full-width rule, then half a line of space.
    fn heading(&mut self, title: &str) {
        let family = self.family();
        self.canvas.set_font(family, FontStyle::BOLD, HEADING_SIZE);
        let budget = LayoutBudget::of(&*self.canvas);
        self.canvas.cell(
            Cell::new(budget.content_width, budget.line_height * 2.0, title)
                .border(Border::BOTTOM)
                .new_line(NewLine::NextLine),
        );
        self.canvas.write(budget.line_height / 2.0, "\n", None);
        self.body_font();
    }

    /// One blank body line.
    fn section_gap(&mut self) {
        let line = self.body_font();
        self.canvas.ln(line);
    }

    pub(super) fn summary(&mut self) {
        let resume: &'a Resume = self.resume;
        let Some(summary) = &resume.basics.summary else {
            return;
        };
        self.heading("Summary");
        let line = self.body_font();
        render_row(&mut *self.canvas, "", summary, RowStyle::PLAIN, 0.0, line);
        self.section_gap();
    }

    pub(super) fn skills_and_interests(&mut self) {
        let resume: &'a Resume = self.resume;
        self.heading("Skills & Interests");
        let row = self.row_height();
        for skill in &resume.skills {
            render_row(
                &mut *self.canvas,
                &skill.name,
                &skill.level,
                RowStyle::new(FontStyle::REGULAR, FontStyle::ITALIC),
                SKILL_RATIO,
                row,
            );
        }

        let names: Vec<&str> = resume.interests.iter().map(|i| i.name.as_str()).collect();
        if let Some(sentence) = interest_sentence(&names) {
            let line = self.body_font();
            self.canvas.ln(line);
            render_row(&mut *self.canvas, "", &sentence, RowStyle::PLAIN, 0.0, line * LIST_SPACING);
        }
        self.section_gap();
    }

    pub(super) fn education(&mut self) {
        let resume: &'a Resume = self.resume;
        self.heading("Education");
        let row = self.row_height();
        for entry in &resume.education {
            let label = year_span(entry.start_date.as_ref(), entry.end_date.as_ref());
            let text = match &entry.study_type {
                Some(study_type) => format!("{} ({} of {})", entry.institution, study_type, entry.area),
                None => entry.institution.clone(),
            };
            render_row(&mut *self.canvas, &label, &text, RowStyle::PLAIN, DATE_RATIO, row);
        }

        let courses: Vec<&str> = resume
            .education
            .iter()
            .flat_map(|e| e.courses.iter().map(String::as_str))
            .collect();
        if courses.is_empty() {
            self.observer.notice(Notice::CoursesSkipped);
            self.section_gap();
            return;
        }

        self.section_gap();
        self.heading("Courses");
        let line = self.body_font() * LIST_SPACING;
        for course in courses {
            self.canvas.write_markup(line, course);
            self.canvas.write(line, "\n", None);
        }
        self.section_gap();
    }

    pub(super) fn work(&mut self) {
        let resume: &'a Resume = self.resume;
        self.heading("Work");
        let row = self.row_height();
        let highlight = RowStyle::new(FontStyle::REGULAR, FontStyle::ITALIC);
        for job in &resume.work {
            let dates = year_range(job.start_date.as_ref(), job.end_date.as_ref());
            let title = format!("{} ({})", job.company, job.position);
            render_row(&mut *self.canvas, &dates, &title, RowStyle::PLAIN, DATE_RATIO, row);
            render_row(&mut *self.canvas, "", &job.summary, RowStyle::PLAIN, DATE_RATIO, row);
            for item in &job.highlights {
                let text = format!("+ {}", item);
                render_row(&mut *self.canvas, "", &text, highlight, DATE_RATIO, row);
            }
        }
        self.section_gap();
    }

    pub(super) fn credit(&mut self) {
        let line = self.body_font();
        let width = content_width(&*self.canvas);
        self.canvas.cell(
            Cell::new(width, line / 2.0, "")
                .border(Border::TOP)
                .new_line(NewLine::NextLine),
        );
        self.canvas.write_markup(line, CREDIT_MARKUP);
        self.canvas.ln(line);
        self.observer.notice(Notice::CreditAdded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, PageSetup, PdfCanvas};
    use crate::layout::{compose, ComposeOptions, Section};

    fn compose_with(json: &str, options: &ComposeOptions) -> (PdfCanvas, Vec<Notice>) {
        let resume = Resume::from_json(json).unwrap();
        let mut canvas = PdfCanvas::new(PageSetup::default());
        let mut notices = Vec::new();
        compose(&resume, options, &mut canvas, &mut notices).unwrap();
        (canvas, notices)
    }

    fn texts(canvas: &PdfCanvas) -> Vec<String> {
        canvas
            .pages()
            .iter()
            .flat_map(|p| p.texts().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_interest_sentence() {
        assert_eq!(interest_sentence::<&str>(&[]), None);
        assert_eq!(interest_sentence(&["A"]).as_deref(), Some("I love A."));
        assert_eq!(interest_sentence(&["A", "B"]).as_deref(), Some("I love A and B."));
        assert_eq!(
            interest_sentence(&["A", "B", "C"]).as_deref(),
            Some("I love A, B and C.")
        );
    }

    #[test]
    fn test_interests_without_skills_skip_section() {
        let (canvas, notices) = compose_with(
            r#"{ "interests": [{ "name": "chess" }, { "name": "tea" }] }"#,
            &ComposeOptions::default(),
        );
        assert!(notices.contains(&Notice::SectionSkipped(Section::SkillsInterests)));
        let texts = texts(&canvas);
        assert!(!texts.contains(&"Skills & Interests".to_string()));
        assert!(!texts.iter().any(|t| t.starts_with("I love")));
    }

    #[test]
    fn test_interests_follow_skills() {
        let (canvas, _) = compose_with(
            r#"{ "skills": [{ "name": "Rust", "level": "Expert" }],
                 "interests": [{ "name": "chess" }, { "name": "tea" }] }"#,
            &ComposeOptions::default(),
        );
        let texts = texts(&canvas);
        let skill = texts.iter().position(|t| t == "Rust").unwrap();
        let sentence = texts.iter().position(|t| t == "I love chess and tea.").unwrap();
        assert!(skill < sentence);
    }

    #[test]
    fn test_skill_rows_are_label_then_italic_level() {
        let (canvas, _) = compose_with(
            r#"{ "skills": [{ "name": "Rust", "level": "Expert" }] }"#,
            &ComposeOptions::default(),
        );
        let level_italic = canvas.pages()[0].ops.iter().any(|op| {
            matches!(op, DrawOp::Text { text, font, .. } if text == "Expert" && font.style.italic)
        });
        assert!(level_italic);
    }

    #[test]
    fn test_education_rows_and_courses() {
        let (canvas, notices) = compose_with(
            r#"{ "education": [
                { "institution": "Uni", "studyType": "Bachelor", "area": "CS",
                  "startDate": "2011-02-01", "endDate": "2014-11-30",
                  "courses": ["<i>Compilers</i>", "Databases"] },
                { "institution": "Night School", "startDate": "2015" }
            ] }"#,
            &ComposeOptions::default(),
        );
        let texts = texts(&canvas);
        assert!(texts.contains(&"2011-2014".to_string()));
        assert!(texts.contains(&"Uni (Bachelor of CS)".to_string()));
        assert!(texts.contains(&"2015-".to_string()));
        assert!(texts.contains(&"Night School".to_string()));
        assert!(texts.contains(&"Courses".to_string()));
        assert!(texts.contains(&"Compilers".to_string()));
        assert!(!notices.contains(&Notice::CoursesSkipped));

        let compilers_italic = canvas.pages()[0].ops.iter().any(|op| {
            matches!(op, DrawOp::Text { text, font, .. } if text == "Compilers" && font.style.italic)
        });
        assert!(compilers_italic);
    }

    #[test]
    fn test_education_label_without_start_date() {
        let (canvas, _) = compose_with(
            r#"{ "education": [{ "institution": "Uni", "endDate": "2014-01-01" }] }"#,
            &ComposeOptions::default(),
        );
        let texts = texts(&canvas);
        let label = texts.iter().position(|t| t == "-2014").expect("label drawn");
        let institution = texts.iter().position(|t| t == "Uni").unwrap();
        assert_eq!(institution, label + 1);
    }

    #[test]
    fn test_empty_job_summary_keeps_its_row() {
        let row_bottom = |json: &str| {
            let (canvas, _) = compose_with(json, &ComposeOptions::default());
            canvas.y()
        };
        let with_summary = row_bottom(
            r#"{ "work": [{ "company": "Acme", "position": "Eng", "summary": "Built things" }] }"#,
        );
        let without = row_bottom(r#"{ "work": [{ "company": "Acme", "position": "Eng" }] }"#);
        assert!((with_summary - without).abs() < 1e-9);
    }

    #[test]
    fn test_no_courses_skips_subsection() {
        let (canvas, notices) = compose_with(
            r#"{ "education": [{ "institution": "Uni" }] }"#,
            &ComposeOptions::default(),
        );
        assert!(notices.contains(&Notice::CoursesSkipped));
        assert!(!texts(&canvas).contains(&"Courses".to_string()));
    }

    #[test]
    fn test_work_label_omitted_without_start_date() {
        let (canvas, _) = compose_with(
            r#"{ "work": [{ "company": "Acme", "position": "Eng", "endDate": "2020" }] }"#,
            &ComposeOptions::default(),
        );
        let texts = texts(&canvas);
        assert!(texts.contains(&"Acme (Eng)".to_string()));
        assert!(!texts.iter().any(|t| t.ends_with("2020")));
    }

    #[test]
    fn test_heading_has_rule() {
        let (canvas, _) = compose_with(
            r#"{ "basics": { "summary": "Hi." } }"#,
            &ComposeOptions::default(),
        );
        let ops = &canvas.pages()[0].ops;
        let heading = ops
            .iter()
            .position(|op| matches!(op, DrawOp::Text { text, font, .. } if text == "Summary" && font.style.bold))
            .expect("heading drawn");
        assert!(ops[..heading].iter().any(|op| matches!(op, DrawOp::Line { .. })));
    }

    #[test]
    fn test_credit_is_linked() {
        let options = ComposeOptions {
            include_credit: true,
            ..Default::default()
        };
        let (canvas, notices) = compose_with(r#"{ "basics": { "name": "J" } }"#, &options);
        assert!(notices.contains(&Notice::CreditAdded));
        let link = canvas.pages()[0].ops.iter().any(|op| {
            matches!(op, DrawOp::Link { uri, .. } if uri == "https://github.com/malpas/amcvgen")
        });
        assert!(link);
    }
}
