pub const GRADING_SYSTEM_PROMPT: &str =
    "中学生向けに分かりやすく、歴史の先生として答え合わせと解説をしてください。";

pub const CORRECTION_SYSTEM_PROMPT: &str = "中学生向けにわかりやすく添削してください。";

pub const GENERATION_SYSTEM_PROMPT: &str =
    "中学生向けに分かりやすく、歴史の先生としてクイズを作成してください。";

/// Placeholders: `{correct_answer}`, `{question}`, `{user_text}`.
pub const GRADING_PROMPT: &str = "あなたは歴史の先生です。以下の一問一答クイズの答え合わせと解説をしてください。
回答は日本語で、以下の形式でお願いします。

正誤: <正解または不正解>
解説: <正解の場合、簡潔な褒め言葉と追加情報。不正解の場合、直後に「正解は「{correct_answer}」です。」という文を入れ、その後で丁寧な解説を100文字程度で>

問題: {question}
あなたの答え: {user_text}
正解: {correct_answer}
";

/// Placeholders: `{source_sentence}`, `{user_text}`.
pub const CORRECTION_PROMPT: &str = "あなたは中学生向けの英語添削AIです。
以下の日本語文を英訳したユーザーの英文を添削し、必ず次の形式で回答してください。

添削後: <自然で文法的に正しい英文>
スコア: <0-100>
アドバイス: <改善点を日本語で丁寧に、中学生向けに分かりやすく200文字程度で>

問題の日本語文: \"{source_sentence}\"
ユーザーの英文: \"{user_text}\"";

/// Placeholder: `{keyword}`.
pub const GENERATION_PROMPT: &str = "あなたは中学の歴史の先生です。江戸時代の重要な出来事に関する一問一答問題を1問だけ作成してください。特に「{keyword}」に関連する出来事に焦点を当てて作成してください。
形式:
問題: <問題文>
答え: <答え>
";

pub const GENERATION_KEYWORDS: [&str; 8] = [
    "政治", "文化", "社会", "経済", "出来事", "人物", "改革", "事件",
];
