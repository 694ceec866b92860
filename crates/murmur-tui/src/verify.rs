//! Verification form controller.
//!
//! Owns the code being typed, the submit state machine, and the
//! notifications raised by a submission. Rendering and key handling live in
//! `app.rs`; this module knows nothing about the terminal.

use murmur_core::{ApiResponse, VerificationSubmission};
use murmur_service::{MessagingService, ServiceError};

pub const SUCCESS_TITLE: &str = "Success";
pub const FAILURE_TITLE: &str = "Signup failed";

/// Submit lifecycle of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Editable; a submit may start.
    Idle,
    /// A verification request is in flight.
    Submitting,
    /// Verified; the user has been sent to sign-in.
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Verify { username: String },
    SignIn,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Verify { username } => format!("/verify/{username}"),
            Route::SignIn => "/sign-in".to_string(),
        }
    }
}

/// Client-side history: the current route plus everything behind it.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    previous: Vec<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            previous: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Every entry, oldest first, ending with the current route.
    pub fn history(&self) -> Vec<Route> {
        let mut history = self.previous.clone();
        history.push(self.current.clone());
        history
    }

    pub fn push(&mut self, route: Route) {
        let prev = std::mem::replace(&mut self.current, route);
        self.previous.push(prev);
    }

    /// Swap the current entry, so `back` cannot return to it.
    pub fn replace(&mut self, route: Route) {
        self.current = route;
    }

    /// Go back one entry. Returns false when already at the first one.
    pub fn back(&mut self) -> bool {
        match self.previous.pop() {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    fn success(description: Option<&str>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: SUCCESS_TITLE.to_string(),
            description: description.map(String::from),
        }
    }

    fn error(description: Option<&str>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: FAILURE_TITLE.to_string(),
            description: description.map(String::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerifyForm {
    username: String,
    code: String,
    state: FormState,
    toasts: Vec<Toast>,
}

impl VerifyForm {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            code: String::new(),
            state: FormState::Idle,
            toasts: Vec::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last_toast(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn is_editable(&self) -> bool {
        self.state == FormState::Idle
    }

    pub fn set_code(&mut self, code: &str) {
        if self.is_editable() {
            self.code = code.to_string();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_editable() {
            self.code.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.is_editable() {
            self.code.pop();
        }
    }

    /// `Idle -> Submitting`, handing back the request to send.
    ///
    /// A blank code is a silent no-op: no request, no toast, still `Idle`.
    /// Also a no-op outside `Idle`.
    pub fn begin_submit(&mut self) -> Option<VerificationSubmission> {
        if self.state != FormState::Idle {
            return None;
        }
        let submission = VerificationSubmission::new(&self.username, &self.code).ok()?;
        self.state = FormState::Submitting;
        Some(submission)
    }

    /// Resolve an in-flight submit.
    ///
    /// Success raises a success toast and replaces the current route with
    /// sign-in (`Submitting -> Done`). Failure raises an error toast with the
    /// server's message, if any, and returns to `Idle`. The error goes no
    /// further.
    pub fn finish_submit(
        &mut self,
        result: Result<ApiResponse, ServiceError>,
        nav: &mut Navigator,
    ) {
        if self.state != FormState::Submitting {
            return;
        }
        match result {
            Ok(resp) => {
                self.toasts.push(Toast::success(resp.message()));
                nav.replace(Route::SignIn);
                self.state = FormState::Done;
            }
            Err(e) => {
                self.toasts.push(Toast::error(e.message()));
                self.state = FormState::Idle;
            }
        }
    }

    /// Validate, send, and resolve in one call.
    pub async fn submit<S: MessagingService + ?Sized>(&mut self, service: &S, nav: &mut Navigator) {
        let Some(submission) = self.begin_submit() else {
            return;
        };
        let result = service.verify_code(&submission).await;
        self.finish_submit(result, nav);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use murmur_core::SuggestedQuestions;

    use super::*;

    enum Reply {
        Verified(&'static str),
        Rejected(u16, Option<&'static str>),
        Unreachable,
    }

    struct FakeService {
        reply: Reply,
        calls: Mutex<Vec<VerificationSubmission>>,
    }

    impl FakeService {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<VerificationSubmission> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessagingService for FakeService {
        async fn verify_code(
            &self,
            submission: &VerificationSubmission,
        ) -> Result<ApiResponse, ServiceError> {
            self.calls.lock().unwrap().push(submission.clone());
            match self.reply {
                Reply::Verified(msg) => Ok(ApiResponse::ok(msg)),
                Reply::Rejected(status, msg) => Err(ServiceError::Rejected {
                    status,
                    message: msg.map(String::from),
                }),
                Reply::Unreachable => Err(ServiceError::Transport("refused".into())),
            }
        }

        async fn suggest_messages(&self) -> Result<SuggestedQuestions, ServiceError> {
            unreachable!("the verify form never asks for suggestions")
        }
    }

    fn verify_route() -> Navigator {
        Navigator::new(Route::Verify {
            username: "alice".into(),
        })
    }

    #[tokio::test]
    async fn blank_code_sends_nothing() {
        for code in ["", "   ", "\t\n"] {
            let svc = FakeService::new(Reply::Verified("Verified"));
            let mut nav = verify_route();
            let mut form = VerifyForm::new("alice");
            form.set_code(code);

            form.submit(&svc, &mut nav).await;

            assert!(svc.calls().is_empty(), "code {code:?} issued a request");
            assert!(form.toasts().is_empty());
            assert_eq!(form.state(), FormState::Idle);
            assert_eq!(nav.current().path(), "/verify/alice");
        }
    }

    #[tokio::test]
    async fn non_blank_code_sends_one_request() {
        let svc = FakeService::new(Reply::Verified("Verified"));
        let mut nav = verify_route();
        let mut form = VerifyForm::new("alice");
        form.set_code(" 123456");

        form.submit(&svc, &mut nav).await;

        assert_eq!(
            svc.calls(),
            vec![VerificationSubmission {
                username: "alice".into(),
                code: " 123456".into(),
            }]
        );
    }

    #[tokio::test]
    async fn success_toasts_and_replaces_route() {
        let svc = FakeService::new(Reply::Verified("Verified"));
        let mut nav = verify_route();
        let mut form = VerifyForm::new("alice");
        form.set_code("123456");

        form.submit(&svc, &mut nav).await;

        let toast = form.last_toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.title, "Success");
        assert_eq!(toast.description.as_deref(), Some("Verified"));
        assert_eq!(nav.current(), &Route::SignIn);
        assert_eq!(nav.history().len(), 1);
        assert!(!nav.back(), "verify page must not be reachable via back");
        assert_eq!(form.state(), FormState::Done);
    }

    #[tokio::test]
    async fn failure_toasts_message_and_stays() {
        let svc = FakeService::new(Reply::Rejected(400, Some("Invalid code")));
        let mut nav = verify_route();
        let mut form = VerifyForm::new("alice");
        form.set_code("000000");

        form.submit(&svc, &mut nav).await;

        let toast = form.last_toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.title, "Signup failed");
        assert_eq!(toast.description.as_deref(), Some("Invalid code"));
        assert_eq!(nav.current().path(), "/verify/alice");
        assert_eq!(form.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn transport_failure_has_no_description() {
        let svc = FakeService::new(Reply::Unreachable);
        let mut nav = verify_route();
        let mut form = VerifyForm::new("alice");
        form.set_code("1");

        form.submit(&svc, &mut nav).await;

        let toast = form.last_toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.description, None);
    }

    #[tokio::test]
    async fn failure_allows_manual_retry() {
        let svc = FakeService::new(Reply::Rejected(500, None));
        let mut nav = verify_route();
        let mut form = VerifyForm::new("alice");
        form.set_code("1");

        form.submit(&svc, &mut nav).await;
        form.submit(&svc, &mut nav).await;

        assert_eq!(svc.calls().len(), 2);
        assert_eq!(form.toasts().len(), 2);
    }

    #[tokio::test]
    async fn done_form_ignores_further_submits() {
        let svc = FakeService::new(Reply::Verified("ok"));
        let mut nav = verify_route();
        let mut form = VerifyForm::new("alice");
        form.set_code("1");

        form.submit(&svc, &mut nav).await;
        form.submit(&svc, &mut nav).await;

        assert_eq!(svc.calls().len(), 1);
        assert_eq!(form.state(), FormState::Done);
    }

    #[test]
    fn begin_submit_moves_to_submitting_once() {
        let mut form = VerifyForm::new("bob");
        form.set_code("42");
        let sub = form.begin_submit().unwrap();
        assert_eq!(sub.username, "bob");
        assert_eq!(form.state(), FormState::Submitting);
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn input_locked_while_submitting() {
        let mut form = VerifyForm::new("bob");
        form.set_code("42");
        form.begin_submit();
        form.push_char('9');
        form.backspace();
        assert_eq!(form.code(), "42");
    }

    #[test]
    fn finish_without_begin_is_ignored() {
        let mut nav = verify_route();
        let mut form = VerifyForm::new("alice");
        form.finish_submit(Ok(ApiResponse::ok("Verified")), &mut nav);
        assert!(form.toasts().is_empty());
        assert_eq!(form.state(), FormState::Idle);
        assert!(matches!(nav.current(), Route::Verify { .. }));
    }

    #[test]
    fn navigator_push_and_back() {
        let mut nav = Navigator::new(Route::SignIn);
        nav.push(Route::Verify {
            username: "carol".into(),
        });
        assert_eq!(nav.current().path(), "/verify/carol");
        assert!(nav.back());
        assert_eq!(nav.current(), &Route::SignIn);
        assert!(!nav.back());
        assert_eq!(nav.history(), vec![Route::SignIn]);
    }
}
