use std::path::Path;

use rand::seq::SliceRandom;

use crate::errors::{AppError, AppResult};

/// Japanese source sentences for the translation-correction exercise, one per line.
#[derive(Clone, Debug, Default)]
pub struct ProblemBank {
    problems: Vec<String>,
}

impl ProblemBank {
    pub fn from_text(text: &str) -> Self {
        let problems = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { problems }
    }

    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::NotFound(format!("problem list {}: {}", path.display(), e))
        })?;
        let bank = Self::from_text(&text);
        log::info!("Loaded {} problems from {}", bank.len(), path.display());
        Ok(bank)
    }

    pub fn random(&self) -> AppResult<&str> {
        self.problems
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .ok_or_else(|| AppError::NotFound("問題がありません。".to_string()))
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_skips_blank_lines_and_trims() {
        let bank = ProblemBank::from_text("私は学生です。\r\n\n  昨日公園に行きました。  \n");

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.problems[1], "昨日公園に行きました。");
    }

    #[test]
    fn random_draws_from_the_bank() {
        let bank = ProblemBank::from_text("一\n二\n三");
        for _ in 0..20 {
            let problem = bank.random().unwrap();
            assert!(["一", "二", "三"].contains(&problem));
        }
    }

    #[test]
    fn random_on_empty_bank_is_not_found() {
        let bank = ProblemBank::default();

        assert!(bank.is_empty());
        assert!(matches!(bank.random(), Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let result = ProblemBank::load("/nonexistent/problems.csv").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
