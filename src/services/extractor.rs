//! Best-effort extraction of labelled fields from a model completion.
//!
//! The model is asked to answer in `<label>: <value>` lines, but nothing
//! enforces that. Each field is looked up on its own; a field that cannot be
//! found is reported as absent and the typed extractors substitute a default,
//! except for question generation, which needs both fields.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    constants::labels::{
        ADVICE_LABEL, ANSWER_LABEL, CORRECTED_LABEL, CORRECTNESS_LABEL, DEFAULT_ADVICE,
        DEFAULT_CORRECTED_TEXT, DEFAULT_CORRECTNESS, DEFAULT_EXPLANATION,
        EXPLANATION_LABEL, QUESTION_EXTRACTION_FAILED, QUESTION_LABEL, SCORE_LABEL,
    },
    errors::{AppError, AppResult},
    models::domain::{CorrectionResult, GradingResult, ModelCompletion, QuizItem},
};

/// How far a field's value reaches past its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extent {
    /// Up to the end of the label's line.
    Line,
    /// Up to the next recognised label, or the end of the text.
    Rest,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub label: &'static str,
    pub extent: Extent,
}

impl FieldSpec {
    pub const fn line(label: &'static str) -> Self {
        Self {
            label,
            extent: Extent::Line,
        }
    }

    pub const fn rest(label: &'static str) -> Self {
        Self {
            label,
            extent: Extent::Rest,
        }
    }
}

struct CompiledField {
    spec: FieldSpec,
    at_line_start: Regex,
    anywhere: Regex,
}

impl CompiledField {
    fn new(spec: FieldSpec) -> Result<Self, regex::Error> {
        // Optional markdown bold around the label or around label and colon,
        // either colon width.
        let label = format!(
            r"\**{}\**[ \t]*[:：]\**[ \t]*",
            regex::escape(spec.label)
        );
        Ok(Self {
            spec,
            at_line_start: Regex::new(&format!(r"(?m)^[ \t]*{}", label))?,
            anywhere: Regex::new(&label)?,
        })
    }

    /// Byte offset where the value begins. Labels that open a line win over
    /// labels buried in prose.
    fn value_start(&self, text: &str) -> Option<usize> {
        self.at_line_start
            .find(text)
            .or_else(|| self.anywhere.find(text))
            .map(|m| m.end())
    }

    /// Start of the next occurrence of this label at or after `from`.
    fn next_label_at(&self, text: &str, from: usize) -> Option<usize> {
        self.at_line_start.find_at(text, from).map(|m| m.start())
    }
}

/// An ordered set of labelled fields, compiled once.
pub struct FieldTemplate {
    fields: Vec<CompiledField>,
}

impl FieldTemplate {
    pub fn new(specs: &[FieldSpec]) -> Result<Self, regex::Error> {
        let fields = specs
            .iter()
            .copied()
            .map(CompiledField::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { fields })
    }

    pub fn extract<'t>(&self, text: &'t str) -> ExtractedFields<'t> {
        let values = self
            .fields
            .iter()
            .map(|field| (field.spec.label, self.extract_one(field, text)))
            .collect();
        ExtractedFields { values }
    }

    fn extract_one<'t>(&self, field: &CompiledField, text: &'t str) -> Option<&'t str> {
        let start = field.value_start(text)?;
        let tail = &text[start..];

        let end = match field.spec.extent {
            Extent::Line => tail.find('\n').map_or(text.len(), |i| start + i),
            Extent::Rest => self
                .fields
                .iter()
                .filter(|other| other.spec.label != field.spec.label)
                .filter_map(|other| other.next_label_at(text, start))
                .min()
                .unwrap_or(text.len()),
        };

        let value = text[start..end].trim();
        (!value.is_empty()).then_some(value)
    }
}

/// Field values found in one completion, keyed by label.
#[derive(Debug)]
pub struct ExtractedFields<'t> {
    values: Vec<(&'static str, Option<&'t str>)>,
}

impl<'t> ExtractedFields<'t> {
    pub fn get(&self, label: &str) -> Option<&'t str> {
        self.values
            .iter()
            .find(|(name, _)| *name == label)
            .and_then(|(_, value)| *value)
    }

    pub fn text_or(&self, label: &str, default: &str) -> String {
        self.get(label).unwrap_or(default).to_string()
    }

    /// Leading digit run of the field, if it parses and falls in `0..=max`.
    pub fn number(&self, label: &str, max: u8) -> Option<u8> {
        let value = self.get(label)?;
        let digits: String = LEADING_DIGITS
            .find(value)?
            .as_str()
            .chars()
            .map(half_width_digit)
            .collect();
        digits.parse::<u8>().ok().filter(|n| *n <= max)
    }
}

fn half_width_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
        _ => c,
    }
}

static LEADING_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9０-９]+").expect("LEADING_DIGITS is a valid regex pattern"));

static GRADING_TEMPLATE: Lazy<FieldTemplate> = Lazy::new(|| {
    FieldTemplate::new(&[
        FieldSpec::line(CORRECTNESS_LABEL),
        FieldSpec::rest(EXPLANATION_LABEL),
    ])
    .expect("grading labels form valid regex patterns")
});

static CORRECTION_TEMPLATE: Lazy<FieldTemplate> = Lazy::new(|| {
    FieldTemplate::new(&[
        FieldSpec::line(CORRECTED_LABEL),
        FieldSpec::line(SCORE_LABEL),
        FieldSpec::rest(ADVICE_LABEL),
    ])
    .expect("correction labels form valid regex patterns")
});

static QUESTION_TEMPLATE: Lazy<FieldTemplate> = Lazy::new(|| {
    FieldTemplate::new(&[
        FieldSpec::line(QUESTION_LABEL),
        FieldSpec::line(ANSWER_LABEL),
    ])
    .expect("question labels form valid regex patterns")
});

pub fn extract_grading(completion: &ModelCompletion) -> GradingResult {
    let fields = GRADING_TEMPLATE.extract(completion.as_str());
    GradingResult {
        correctness: fields.text_or(CORRECTNESS_LABEL, DEFAULT_CORRECTNESS),
        explanation: fields.text_or(EXPLANATION_LABEL, DEFAULT_EXPLANATION),
    }
}

pub fn extract_correction(completion: &ModelCompletion) -> CorrectionResult {
    let fields = CORRECTION_TEMPLATE.extract(completion.as_str());
    CorrectionResult {
        corrected_text: fields.text_or(CORRECTED_LABEL, DEFAULT_CORRECTED_TEXT),
        score: fields.number(SCORE_LABEL, 100),
        advice: fields.text_or(ADVICE_LABEL, DEFAULT_ADVICE),
    }
}

/// Unlike grading and correction, a generated question is useless without
/// both halves, so a missing field fails the whole extraction.
pub fn extract_quiz_item(completion: &ModelCompletion) -> AppResult<QuizItem> {
    let fields = QUESTION_TEMPLATE.extract(completion.as_str());
    match (fields.get(QUESTION_LABEL), fields.get(ANSWER_LABEL)) {
        (Some(question), Some(answer)) => Ok(QuizItem::new(question, answer)),
        _ => Err(AppError::ExtractionFailed(
            QUESTION_EXTRACTION_FAILED.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(text: &str) -> ModelCompletion {
        ModelCompletion::new(text)
    }

    #[test]
    fn grading_extracts_single_line_verdict_and_explanation() {
        let result = extract_grading(&completion("正誤: 正解\n解説: よくできました。"));

        assert_eq!(result.correctness, "正解");
        assert_eq!(result.explanation, "よくできました。");
    }

    #[test]
    fn grading_explanation_spans_multiple_lines() {
        let result = extract_grading(&completion(
            "正誤: 不正解\n解説: 正解は「徳川家康」です。時代背景の説明...\n続き",
        ));

        assert_eq!(result.correctness, "不正解");
        assert_eq!(
            result.explanation,
            "正解は「徳川家康」です。時代背景の説明...\n続き"
        );
    }

    #[test]
    fn grading_ignores_leading_commentary() {
        let result = extract_grading(&completion(
            "採点結果をお伝えします。\n\n正誤: 正解\n解説: よくできました。",
        ));

        assert_eq!(result.correctness, "正解");
        assert_eq!(result.explanation, "よくできました。");
    }

    #[test]
    fn grading_accepts_full_width_colon_and_bold_labels() {
        let result = extract_grading(&completion("**正誤**：正解\n  解説：見事です。"));

        assert_eq!(result.correctness, "正解");
        assert_eq!(result.explanation, "見事です。");
    }

    #[test]
    fn grading_explanation_before_verdict_stops_at_verdict_label() {
        let result = extract_grading(&completion("解説: 江戸幕府の初代将軍です。\n正誤: 正解"));

        assert_eq!(result.explanation, "江戸幕府の初代将軍です。");
        assert_eq!(result.correctness, "正解");
    }

    #[test]
    fn grading_substitutes_defaults_for_missing_fields() {
        let result = extract_grading(&completion("正誤: 正解"));
        assert_eq!(result.correctness, "正解");
        assert_eq!(result.explanation, DEFAULT_EXPLANATION);

        let result = extract_grading(&completion("よくわかりません。"));
        assert_eq!(result.correctness, DEFAULT_CORRECTNESS);
        assert_eq!(result.explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn grading_treats_empty_value_as_missing() {
        let result = extract_grading(&completion("正誤:\n解説: 説明です。"));

        assert_eq!(result.correctness, DEFAULT_CORRECTNESS);
        assert_eq!(result.explanation, "説明です。");
    }

    #[test]
    fn correction_extracts_integer_score() {
        let result = extract_correction(&completion(
            "添削後: I went to the park yesterday.\nスコア: 85\nアドバイス: 文法は正確です。",
        ));

        assert_eq!(result.corrected_text, "I went to the park yesterday.");
        assert_eq!(result.score, Some(85));
        assert_eq!(result.advice, "文法は正確です。");
    }

    #[test]
    fn correction_reads_leading_digits_of_score() {
        let result = extract_correction(&completion("添削後: Hi.\nスコア: 70点\nアドバイス: OK"));
        assert_eq!(result.score, Some(70));

        let result = extract_correction(&completion("添削後: Hi.\nスコア: 90/100\nアドバイス: OK"));
        assert_eq!(result.score, Some(90));
    }

    #[test]
    fn bold_label_with_colon_inside_is_stripped() {
        let result = extract_correction(&completion(
            "**添削後:** I went to the park yesterday.\n**スコア:** 85\n**アドバイス:** 文法は正確です。",
        ));

        assert_eq!(result.corrected_text, "I went to the park yesterday.");
        assert_eq!(result.score, Some(85));
        assert_eq!(result.advice, "文法は正確です。");

        let result = extract_grading(&completion("**正誤：** 正解\n**解説：** よくできました。"));
        assert_eq!(result.correctness, "正解");
        assert_eq!(result.explanation, "よくできました。");
    }

    #[test]
    fn correction_reads_full_width_score_digits() {
        let result = extract_correction(&completion("添削後: Hi.\nスコア：８５\nアドバイス: OK"));
        assert_eq!(result.score, Some(85));

        let result = extract_correction(&completion("添削後: Hi.\nスコア: ７0点\nアドバイス: OK"));
        assert_eq!(result.score, Some(70));
    }

    #[test]
    fn correction_rejects_non_numeric_and_out_of_range_scores() {
        let result = extract_correction(&completion("添削後: Hi.\nスコア: 高い\nアドバイス: OK"));
        assert_eq!(result.score, None);

        let result = extract_correction(&completion("添削後: Hi.\nスコア: 150\nアドバイス: OK"));
        assert_eq!(result.score, None);
    }

    #[test]
    fn correction_keeps_other_fields_when_one_is_missing() {
        let result = extract_correction(&completion(
            "添削後: I went to the park yesterday.\nアドバイス: 過去形に注意しましょう。\n例文も確認してね。",
        ));

        assert_eq!(result.corrected_text, "I went to the park yesterday.");
        assert_eq!(result.score, None);
        assert_eq!(
            result.advice,
            "過去形に注意しましょう。\n例文も確認してね。"
        );
    }

    #[test]
    fn correction_all_missing_yields_all_defaults() {
        let result = extract_correction(&completion(""));

        assert_eq!(result.corrected_text, DEFAULT_CORRECTED_TEXT);
        assert_eq!(result.score, None);
        assert_eq!(result.advice, DEFAULT_ADVICE);
    }

    #[test]
    fn quiz_item_ignores_surrounding_commentary() {
        let item = extract_quiz_item(&completion(
            "こんな問題はどうでしょう。\n問題: 享保の改革を行った将軍は？\n答え: 徳川吉宗\n頑張ってください！",
        ))
        .unwrap();

        assert_eq!(item.question, "享保の改革を行った将軍は？");
        assert_eq!(item.answer, "徳川吉宗");
    }

    #[test]
    fn quiz_item_without_answer_fails() {
        let err = extract_quiz_item(&completion("問題: 享保の改革を行った将軍は？")).unwrap_err();

        assert_eq!(
            err,
            AppError::ExtractionFailed(QUESTION_EXTRACTION_FAILED.to_string())
        );
    }

    #[test]
    fn quiz_item_without_question_fails() {
        assert!(extract_quiz_item(&completion("答え: 徳川吉宗")).is_err());
    }

    #[test]
    fn label_inside_prose_is_used_only_when_no_line_starts_with_it() {
        let fields = GRADING_TEMPLATE.extract("判定は 正誤: 正解 です");
        assert_eq!(fields.get(CORRECTNESS_LABEL), Some("正解 です"));
    }

    #[test]
    fn crlf_line_endings_are_trimmed() {
        let result = extract_grading(&completion("正誤: 正解\r\n解説: よくできました。\r\n"));

        assert_eq!(result.correctness, "正解");
        assert_eq!(result.explanation, "よくできました。");
    }
}
