//! In-memory backend stub shared by service and router tests

use super::{BackendError, QuizBackend};
use crate::models::{
    Author, ListParams, NewAuthor, NewsReference, NewsSource, Question, QuestionFilter,
    QuestionPage, QuestionPatch, Role, VerifiedAuthor,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the remote quiz backend.
///
/// Tracks every call so tests can assert that certain paths never reach
/// the backend at all. Setting `fail` makes every call answer with a
/// 500-style error.
#[derive(Default)]
pub struct StubBackend {
    pub authors: Mutex<Vec<Author>>,
    /// username -> (password, author id)
    pub credentials: Mutex<HashMap<String, (String, i64)>>,
    pub questions: Mutex<Vec<Question>>,
    pub news: Mutex<Vec<NewsReference>>,
    next_id: AtomicI64,
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
}

impl StubBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        })
    }

    pub fn with_author(self: Arc<Self>, id: i64, username: &str, role: Role) -> Arc<Self> {
        self.authors.lock().unwrap().push(Author {
            id,
            username: username.to_string(),
            role,
        });
        self.credentials
            .lock()
            .unwrap()
            .insert(username.to_string(), ("secret".to_string(), id));
        self
    }

    pub fn with_question(self: Arc<Self>, question: Question) -> Arc<Self> {
        self.questions.lock().unwrap().push(question);
        self
    }

    pub fn with_news(self: Arc<Self>, items: Vec<NewsReference>) -> Arc<Self> {
        *self.news.lock().unwrap() = items;
        self
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(BackendError::UnexpectedStatus {
                url: "stub".to_string(),
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl QuizBackend for StubBackend {
    async fn verify_creds(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<VerifiedAuthor>, BackendError> {
        self.enter()?;
        let credentials = self.credentials.lock().unwrap();
        match credentials.get(username) {
            Some((stored, id)) if stored == password => Ok(Some(VerifiedAuthor {
                id: *id,
                username: username.to_string(),
            })),
            _ => Ok(None),
        }
    }

    async fn list_authors(&self, role: Option<Role>) -> Result<Vec<Author>, BackendError> {
        self.enter()?;
        let authors = self.authors.lock().unwrap();
        Ok(authors
            .iter()
            .filter(|a| role.map_or(true, |r| a.role == r))
            .cloned()
            .collect())
    }

    async fn create_author(&self, author: &NewAuthor) -> Result<(), BackendError> {
        self.enter()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1000;
        self.authors.lock().unwrap().push(Author {
            id,
            username: author.username.clone(),
            role: author.role,
        });
        self.credentials
            .lock()
            .unwrap()
            .insert(author.username.clone(), (author.password.clone(), id));
        Ok(())
    }

    async fn list_questions(
        &self,
        filter: &QuestionFilter,
        params: &ListParams,
    ) -> Result<QuestionPage, BackendError> {
        self.enter()?;
        let questions = self.questions.lock().unwrap();
        let matching: Vec<Question> = questions
            .iter()
            .filter(|q| filter.status.map_or(true, |s| q.status == s))
            .filter(|q| filter.category.as_ref().map_or(true, |c| &q.category == c))
            .filter(|q| filter.difficulty.map_or(true, |d| q.difficulty == d))
            .filter(|q| filter.author_id.map_or(true, |a| q.author_id == a))
            .cloned()
            .collect();

        let start = ((params.page.max(1) - 1) * params.page_size) as usize;
        let end = (start + params.page_size as usize).min(matching.len());
        let result = if start < matching.len() {
            matching[start..end].to_vec()
        } else {
            Vec::new()
        };
        let next_page = if end < matching.len() {
            Some(params.page + 1)
        } else {
            None
        };

        Ok(QuestionPage { result, next_page })
    }

    async fn get_question(&self, id: i64) -> Result<Question, BackendError> {
        self.enter()?;
        let questions = self.questions.lock().unwrap();
        questions
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn create_questions(&self, new_questions: &[Question]) -> Result<(), BackendError> {
        self.enter()?;
        let mut questions = self.questions.lock().unwrap();
        for question in new_questions {
            let mut stored = question.clone();
            stored.id = self.next_id.fetch_add(1, Ordering::SeqCst);
            questions.push(stored);
        }
        Ok(())
    }

    async fn update_question(
        &self,
        id: i64,
        patch: &QuestionPatch,
    ) -> Result<Question, BackendError> {
        self.enter()?;
        let mut questions = self.questions.lock().unwrap();
        let stored = questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(BackendError::NotFound)?;
        *stored = patch.apply_to(stored);
        Ok(stored.clone())
    }

    async fn delete_question(&self, id: i64) -> Result<(), BackendError> {
        self.enter()?;
        let mut questions = self.questions.lock().unwrap();
        let before = questions.len();
        questions.retain(|q| q.id != id);
        if questions.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }

    async fn fetch_news(
        &self,
        _source: NewsSource,
        _category: &str,
    ) -> Result<Vec<NewsReference>, BackendError> {
        self.enter()?;
        Ok(self.news.lock().unwrap().clone())
    }
}
