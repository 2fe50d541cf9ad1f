//! Field labels the model is told to emit, and the defaults used when it doesn't.

pub const CORRECTNESS_LABEL: &str = "正誤";
pub const EXPLANATION_LABEL: &str = "解説";

pub const CORRECTED_LABEL: &str = "添削後";
pub const SCORE_LABEL: &str = "スコア";
pub const ADVICE_LABEL: &str = "アドバイス";

pub const QUESTION_LABEL: &str = "問題";
pub const ANSWER_LABEL: &str = "答え";

pub const DEFAULT_CORRECTNESS: &str = "判定不能";
pub const DEFAULT_EXPLANATION: &str = "解説がありません";

pub const DEFAULT_CORRECTED_TEXT: &str = "添削結果を取得できませんでした";
pub const DEFAULT_SCORE: u8 = 0;
pub const DEFAULT_ADVICE: &str = "アドバイスがありません";

pub const QUESTION_EXTRACTION_FAILED: &str = "AIの応答から問題と答えを抽出できませんでした。";

/// Substring marking a correct verdict; note that it also occurs inside [`INCORRECT_MARKER`].
pub const CORRECT_MARKER: &str = "正解";
pub const INCORRECT_MARKER: &str = "不正解";
