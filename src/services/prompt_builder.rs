use crate::{
    constants::prompts::{
        CORRECTION_PROMPT, CORRECTION_SYSTEM_PROMPT, GENERATION_PROMPT, GENERATION_SYSTEM_PROMPT,
        GRADING_PROMPT, GRADING_SYSTEM_PROMPT,
    },
    models::domain::{CorrectionRequest, GradingRequest},
};

/// A system instruction plus the user-role prompt sent with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
}

pub fn grading_prompt(request: &GradingRequest) -> Prompt {
    Prompt {
        system: GRADING_SYSTEM_PROMPT,
        user: render(
            GRADING_PROMPT,
            &[
                ("user_text", request.user_text()),
                ("question", request.question()),
                ("correct_answer", request.correct_answer()),
            ],
        ),
    }
}

pub fn correction_prompt(request: &CorrectionRequest) -> Prompt {
    Prompt {
        system: CORRECTION_SYSTEM_PROMPT,
        user: render(
            CORRECTION_PROMPT,
            &[
                ("user_text", request.user_text()),
                ("source_sentence", request.source_sentence()),
            ],
        ),
    }
}

pub fn question_prompt(keyword: &str) -> Prompt {
    Prompt {
        system: GENERATION_SYSTEM_PROMPT,
        user: render(GENERATION_PROMPT, &[("keyword", keyword)]),
    }
}

/// Substitutes `{name}` placeholders in a single pass, so braces inside
/// substituted values are never expanded again. Unknown placeholders are
/// left as written.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match values.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_prompt_embeds_all_fields_and_template() {
        let request =
            GradingRequest::new("豊臣秀吉", "江戸幕府を開いた人物は？", "徳川家康").unwrap();
        let prompt = grading_prompt(&request);

        assert_eq!(prompt.system, GRADING_SYSTEM_PROMPT);
        assert!(prompt.user.contains("問題: 江戸幕府を開いた人物は？"));
        assert!(prompt.user.contains("あなたの答え: 豊臣秀吉"));
        assert!(prompt.user.contains("正解: 徳川家康"));
        assert!(prompt.user.contains("正解は「徳川家康」です。"));
        assert!(prompt.user.contains("正誤: <正解または不正解>"));
        assert!(!prompt.user.contains('{'));
    }

    #[test]
    fn correction_prompt_quotes_both_sentences() {
        let request =
            CorrectionRequest::new("I go to park yesterday.", "私は昨日公園に行きました。").unwrap();
        let prompt = correction_prompt(&request);

        assert_eq!(prompt.system, CORRECTION_SYSTEM_PROMPT);
        assert!(prompt.user.contains("問題の日本語文: \"私は昨日公園に行きました。\""));
        assert!(prompt.user.contains("ユーザーの英文: \"I go to park yesterday.\""));
        assert!(prompt.user.contains("スコア: <0-100>"));
    }

    #[test]
    fn question_prompt_focuses_on_keyword() {
        let prompt = question_prompt("改革");

        assert_eq!(prompt.system, GENERATION_SYSTEM_PROMPT);
        assert!(prompt.user.contains("特に「改革」に関連する出来事"));
        assert!(prompt.user.contains("答え: <答え>"));
    }

    #[test]
    fn render_does_not_expand_placeholders_inside_values() {
        let out = render(
            "a={a} b={b}",
            &[("a", "{b}"), ("b", "x")],
        );
        assert_eq!(out, "a={b} b=x");
    }

    #[test]
    fn render_keeps_unknown_and_unclosed_braces() {
        assert_eq!(render("{unknown} and {", &[]), "{unknown} and {");
    }
}
