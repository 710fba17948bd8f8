use std::collections::HashMap;

use color_eyre::Result;
use serde::Deserialize;

use crate::models::{Lesson, Question};

/// One question record as the content store serves it: four lettered
/// option fields and a single-letter answer code.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    id: String,
    question: String,
    a: String,
    b: String,
    c: String,
    d: String,
    answer: String,
    category: String,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    option_images: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct LessonRecord {
    title: String,
    body: String,
}

/// Client for the remote content store.
///
/// Callers treat fetch failures as "content unavailable" and keep going
/// with whatever they already have; the errors returned here stop at the
/// bank's loading boundary.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the flat question list. Records that fail the letter-to-index
    /// conversion are skipped with a warning rather than failing the whole
    /// batch.
    pub async fn fetch_questions(&self) -> Result<Vec<Question>> {
        let url = format!("{}/questions", self.base_url);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            color_eyre::eyre::bail!("content store returned {} for {url}", resp.status());
        }

        let records: Vec<QuestionRecord> = resp.json().await?;
        let total = records.len();
        let questions: Vec<Question> = records.into_iter().filter_map(convert_record).collect();

        tracing::info!("fetched {} questions ({} records)", questions.len(), total);
        Ok(questions)
    }

    /// Fetch lesson notes, served as a map from category id to entries.
    pub async fn fetch_lessons(&self) -> Result<Vec<Lesson>> {
        let url = format!("{}/notes", self.base_url);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            color_eyre::eyre::bail!("content store returned {} for {url}", resp.status());
        }

        let by_category: HashMap<String, Vec<LessonRecord>> = resp.json().await?;
        let lessons: Vec<Lesson> = by_category
            .into_iter()
            .flat_map(|(category, records)| {
                records.into_iter().map(move |record| Lesson {
                    category: category.clone(),
                    title: record.title,
                    body: record.body,
                })
            })
            .collect();

        tracing::info!("fetched {} lesson entries", lessons.len());
        Ok(lessons)
    }
}

fn convert_record(record: QuestionRecord) -> Option<Question> {
    let correct_index = match record.answer.to_ascii_lowercase().as_str() {
        "a" => 0,
        "b" => 1,
        "c" => 2,
        "d" => 3,
        other => {
            tracing::warn!("question {} has answer code '{other}', skipped", record.id);
            return None;
        }
    };

    Some(Question {
        id: record.id,
        prompt: record.question,
        options: vec![record.a, record.b, record.c, record.d],
        correct_index,
        category: record.category,
        explanation: record.explanation,
        image: record.image,
        option_images: record.option_images,
    })
}
