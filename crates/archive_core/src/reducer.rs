//! Reducer actions, side-effect intents, and transition logic for the archive client.

use platform_host::{format_date_dotted, format_date_slashed, local_today};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{CatalogError, FileCatalog},
    config::{ArchiveConfig, Locale},
    model::{FileId, Notice, ViewMode},
    routes::{guard, landing_action, LandingAction, Route, RouteDecision},
    session::{Session, SessionError, SessionState},
    upload::{SelectedFile, UploadError, UploadEvent, UploadId, UploadTask},
    validation::{LoginCredentials, LoginForm, Registration, RegistrationForm, ValidationErrors},
    verification::{MockCodeSource, VerificationChallenge, VerificationError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Request waiting on its artificial delay. Only one may be in flight.
pub enum PendingRequest {
    Login,
    Registration,
    Verification,
    Resend,
}

#[derive(Debug, Clone, PartialEq)]
/// Everything the client tracks for one browser tab.
pub struct ArchiveState {
    pub config: ArchiveConfig,
    pub session: SessionState,
    pub route: Route,
    pub login_dialog_open: bool,
    pub pending: Option<PendingRequest>,
    pub catalog: FileCatalog,
    pub search_term: String,
    pub view_mode: ViewMode,
    pub upload_dialog_open: bool,
    pub selected_file: Option<SelectedFile>,
    pub upload: Option<UploadTask>,
    /// Files with a delete in flight.
    pub deleting: Vec<FileId>,
    next_upload_id: u64,
}

impl Default for ArchiveState {
    fn default() -> Self {
        Self::new(ArchiveConfig::default())
    }
}

impl ArchiveState {
    /// Fresh logged-out state with the demo catalog.
    pub fn new(config: ArchiveConfig) -> Self {
        Self {
            config,
            session: SessionState::LoggedOut,
            route: Route::Home,
            login_dialog_open: false,
            pending: None,
            catalog: FileCatalog::with_demo_files(),
            search_term: String::new(),
            view_mode: ViewMode::List,
            upload_dialog_open: false,
            selected_file: None,
            upload: None,
            deleting: Vec::new(),
            next_upload_id: 1,
        }
    }

    /// Catalog entries matching the current search term.
    pub fn visible_files(&self) -> Vec<&crate::model::FileRecord> {
        self.catalog.search(&self.search_term)
    }

    pub fn is_deleting(&self, id: FileId) -> bool {
        self.deleting.contains(&id)
    }

    fn today_label(&self) -> String {
        let today = local_today();
        match self.config.locale {
            Locale::Ru => format_date_dotted(today),
            Locale::En => format_date_slashed(today),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_archive`] to mutate [`ArchiveState`].
pub enum ArchiveAction {
    /// The location changed; the guard may redirect.
    Navigate(Route),
    /// Landing page "start working" button.
    StartWork,
    SetLoginDialogOpen(bool),
    /// Validate the login form and start the artificial delay.
    SubmitLogin(LoginForm),
    /// Delay elapsed for a validated login.
    CompleteLogin(LoginCredentials),
    /// Validate the registration form and start the artificial delay.
    SubmitRegistration(RegistrationForm),
    /// Delay elapsed; issue the verification challenge.
    CompleteRegistration(Registration),
    SubmitVerificationCode(String),
    CompleteVerification(String),
    /// One second of the resend countdown elapsed.
    TickResendCountdown,
    RequestResendCode,
    CompleteResendCode,
    Logout,
    /// Restore a session read from flag storage at boot.
    HydrateSession(SessionState),
    /// Apply a stored configuration override.
    HydrateConfig(ArchiveConfig),
    SetSearchTerm(String),
    SetViewMode(ViewMode),
    OpenUploadDialog,
    /// Closing the dialog aborts an in-flight upload.
    CloseUploadDialog,
    SelectFile(Option<SelectedFile>),
    StartUpload,
    /// Progress reported by the upload runner.
    Upload(UploadEvent),
    /// Add a file directly with the placeholder size.
    AddFile(String),
    /// Begin the delayed delete of one record.
    RequestDelete(FileId),
    DeleteFile(FileId),
    /// Remove every record with this exact name.
    DeleteFilesNamed(String),
    DownloadFile(FileId),
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_archive`] for the runtime to execute.
pub enum ArchiveEffect {
    PersistSession(Session),
    ClearPersistedSession,
    /// Push a new location.
    NavigateTo(Route),
    Notify(Notice),
    /// Dispatch `action` after `delay_ms`.
    Schedule {
        delay_ms: u32,
        action: Box<ArchiveAction>,
    },
    StartUploadTicker {
        task: UploadTask,
        tick_ms: u32,
    },
    AbortUpload(UploadId),
    StartResendCountdown,
    StopResendCountdown,
}

#[derive(Debug, Error, Clone, PartialEq)]
/// Rejected actions. A rejected action leaves the state untouched.
pub enum ArchiveError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("another request is still in progress")]
    Busy,
    #[error("action requires a logged-in session")]
    NotLoggedIn,
}

impl ArchiveError {
    /// Toast to show for errors that have no inline form message.
    pub fn user_notice(&self) -> Option<Notice> {
        match self {
            Self::Upload(UploadError::NoFileSelected) => Some(Notice::error(
                "Файл не выбран",
                "Пожалуйста, выберите файл для загрузки.",
            )),
            Self::Verification(VerificationError::ResendNotReady { remaining_secs }) => {
                Some(Notice::error(
                    "Подождите",
                    format!("Запросить новый код можно через {remaining_secs} сек."),
                ))
            }
            _ => None,
        }
    }
}

/// Applies an [`ArchiveAction`] and collects the resulting side effects.
///
/// # Errors
///
/// Returns an [`ArchiveError`] when the action is invalid for the current state; callers should
/// discard the (possibly partially mutated) state in that case.
pub fn reduce_archive(
    state: &mut ArchiveState,
    action: ArchiveAction,
) -> Result<Vec<ArchiveEffect>, ArchiveError> {
    let mut effects = Vec::new();
    match action {
        ArchiveAction::Navigate(route) => {
            let resolved = resolve_route(state, route);
            if resolved != route {
                effects.push(ArchiveEffect::NavigateTo(resolved));
            }
        }
        ArchiveAction::StartWork => match landing_action(&state.session) {
            LandingAction::Navigate(route) => {
                state.route = route;
                effects.push(ArchiveEffect::NavigateTo(route));
            }
            LandingAction::OpenLoginDialog => state.login_dialog_open = true,
        },
        ArchiveAction::SetLoginDialogOpen(open) => {
            state.login_dialog_open = open;
        }
        ArchiveAction::SubmitLogin(form) => {
            ensure_idle(state)?;
            let credentials = form.validate()?;
            state.pending = Some(PendingRequest::Login);
            state.session.begin_login(credentials.email.clone());
            effects.push(schedule(
                state.config.artificial_delay_ms,
                ArchiveAction::CompleteLogin(credentials),
            ));
        }
        ArchiveAction::CompleteLogin(credentials) => {
            if !state.session.is_authenticating(&credentials.email)
                || !take_pending(state, PendingRequest::Login)
            {
                return Ok(effects);
            }
            state.login_dialog_open = false;
            let session = state.session.login(&credentials);
            state.route = Route::Cloud;
            effects.push(ArchiveEffect::PersistSession(session));
            effects.push(ArchiveEffect::Notify(Notice::info(
                "Вход выполнен успешно!",
                "Добро пожаловать в СГЦУ архив.",
            )));
            effects.push(ArchiveEffect::NavigateTo(Route::Cloud));
        }
        ArchiveAction::SubmitRegistration(form) => {
            ensure_idle(state)?;
            let registration = form.validate()?;
            state.pending = Some(PendingRequest::Registration);
            effects.push(schedule(
                state.config.artificial_delay_ms,
                ArchiveAction::CompleteRegistration(registration),
            ));
        }
        ArchiveAction::CompleteRegistration(registration) => {
            if !take_pending(state, PendingRequest::Registration) {
                return Ok(effects);
            }
            let email = registration.email.clone();
            let challenge = VerificationChallenge::issue(
                registration,
                &MockCodeSource,
                state.config.verification_code_len,
                state.config.resend_cooldown_secs,
            );
            state.session.await_verification(challenge);
            effects.push(ArchiveEffect::Notify(Notice::info(
                "Код подтверждения отправлен",
                format!(
                    "На вашу почту {email} отправлен {}-значный код для подтверждения аккаунта.",
                    state.config.verification_code_len
                ),
            )));
            effects.push(ArchiveEffect::StartResendCountdown);
        }
        ArchiveAction::SubmitVerificationCode(code) => {
            ensure_idle(state)?;
            let challenge = state
                .session
                .challenge()
                .ok_or(SessionError::NoPendingVerification)?;
            if !challenge.is_submittable(&code) {
                return Err(VerificationError::IncompleteCode {
                    expected: state.config.verification_code_len,
                }
                .into());
            }
            state.pending = Some(PendingRequest::Verification);
            effects.push(schedule(
                state.config.artificial_delay_ms,
                ArchiveAction::CompleteVerification(code),
            ));
        }
        ArchiveAction::CompleteVerification(code) => {
            if !take_pending(state, PendingRequest::Verification) {
                return Ok(effects);
            }
            match state.session.verify(&code) {
                Ok(session) => {
                    state.route = Route::Cloud;
                    effects.push(ArchiveEffect::StopResendCountdown);
                    effects.push(ArchiveEffect::PersistSession(session));
                    effects.push(ArchiveEffect::Notify(Notice::info(
                        "Код подтвержден",
                        "Ваш email успешно подтвержден.",
                    )));
                    effects.push(ArchiveEffect::Notify(Notice::info(
                        "Успешная регистрация!",
                        "Добро пожаловать в СГЦУ архив.",
                    )));
                    effects.push(ArchiveEffect::NavigateTo(Route::Cloud));
                }
                Err(SessionError::Verification(_)) => {
                    effects.push(ArchiveEffect::Notify(Notice::error(
                        "Неверный код",
                        "Пожалуйста, проверьте код и попробуйте снова.",
                    )));
                }
                Err(err) => return Err(err.into()),
            }
        }
        ArchiveAction::TickResendCountdown => {
            if let Some(challenge) = state.session.challenge_mut() {
                if challenge.tick_second() {
                    effects.push(ArchiveEffect::StopResendCountdown);
                }
            } else {
                effects.push(ArchiveEffect::StopResendCountdown);
            }
        }
        ArchiveAction::RequestResendCode => {
            ensure_idle(state)?;
            let challenge = state
                .session
                .challenge()
                .ok_or(SessionError::NoPendingVerification)?;
            if !challenge.can_resend() {
                return Err(VerificationError::ResendNotReady {
                    remaining_secs: challenge.remaining_secs(),
                }
                .into());
            }
            state.pending = Some(PendingRequest::Resend);
            effects.push(schedule(
                state.config.artificial_delay_ms,
                ArchiveAction::CompleteResendCode,
            ));
        }
        ArchiveAction::CompleteResendCode => {
            if !take_pending(state, PendingRequest::Resend) {
                return Ok(effects);
            }
            let challenge = state
                .session
                .challenge_mut()
                .ok_or(SessionError::NoPendingVerification)?;
            challenge.resend(&MockCodeSource)?;
            effects.push(ArchiveEffect::Notify(Notice::info(
                "Код отправлен",
                format!(
                    "Новый код подтверждения отправлен на {}",
                    challenge.email()
                ),
            )));
            effects.push(ArchiveEffect::StartResendCountdown);
        }
        ArchiveAction::Logout => {
            if let Some(task) = state.upload.take() {
                effects.push(ArchiveEffect::AbortUpload(task.id));
            }
            state.session.logout();
            state.pending = None;
            state.upload_dialog_open = false;
            state.selected_file = None;
            state.deleting.clear();
            state.route = Route::Home;
            effects.push(ArchiveEffect::StopResendCountdown);
            effects.push(ArchiveEffect::ClearPersistedSession);
            effects.push(ArchiveEffect::NavigateTo(Route::Home));
        }
        ArchiveAction::HydrateSession(session) => {
            state.session = session;
            let current = state.route;
            let resolved = resolve_route(state, current);
            if resolved != current {
                effects.push(ArchiveEffect::NavigateTo(resolved));
            }
        }
        ArchiveAction::HydrateConfig(config) => {
            state.config = config;
        }
        ArchiveAction::SetSearchTerm(term) => {
            state.search_term = term;
        }
        ArchiveAction::SetViewMode(mode) => {
            state.view_mode = mode;
        }
        ArchiveAction::OpenUploadDialog => {
            ensure_logged_in(state)?;
            state.upload_dialog_open = true;
        }
        ArchiveAction::CloseUploadDialog => {
            state.upload_dialog_open = false;
            state.selected_file = None;
            if let Some(task) = state.upload.take() {
                effects.push(ArchiveEffect::AbortUpload(task.id));
            }
        }
        ArchiveAction::SelectFile(file) => {
            if state.upload.is_some() {
                return Err(UploadError::AlreadyRunning.into());
            }
            if file.as_ref().is_some_and(|f| f.name.trim().is_empty()) {
                return Err(CatalogError::EmptyName.into());
            }
            state.selected_file = file;
        }
        ArchiveAction::StartUpload => {
            ensure_logged_in(state)?;
            if state.upload.is_some() {
                return Err(UploadError::AlreadyRunning.into());
            }
            let file = state
                .selected_file
                .clone()
                .ok_or(UploadError::NoFileSelected)?;
            let id = UploadId(state.next_upload_id);
            state.next_upload_id += 1;
            let task = UploadTask::new(id, file, state.config.upload_step_percent);
            state.upload = Some(task.clone());
            effects.push(ArchiveEffect::StartUploadTicker {
                task,
                tick_ms: state.config.upload_tick_ms,
            });
        }
        ArchiveAction::Upload(event) => {
            let Some(task) = state.upload.as_mut().filter(|t| t.id == event.id()) else {
                // Ticks from aborted or replaced uploads.
                return Ok(effects);
            };
            match event {
                UploadEvent::Progress { percent, .. } => task.record_progress(percent),
                UploadEvent::Aborted { .. } => state.upload = None,
                UploadEvent::Completed { file, .. } => {
                    let size = state.config.placeholder_size.clone();
                    let date_added = state.today_label();
                    state.catalog.add_file(&file.name, size, date_added)?;
                    state.upload = None;
                    state.selected_file = None;
                    state.upload_dialog_open = false;
                    effects.push(ArchiveEffect::Notify(Notice::info(
                        "Загрузка завершена",
                        "Файл успешно загружен в облачное хранилище.",
                    )));
                }
            }
        }
        ArchiveAction::AddFile(name) => {
            ensure_logged_in(state)?;
            let size = state.config.placeholder_size.clone();
            let date_added = state.today_label();
            state.catalog.add_file(&name, size, date_added)?;
        }
        ArchiveAction::RequestDelete(id) => {
            ensure_logged_in(state)?;
            state.catalog.get(id).ok_or(CatalogError::FileNotFound)?;
            if !state.is_deleting(id) {
                state.deleting.push(id);
                effects.push(schedule(
                    state.config.delete_delay_ms,
                    ArchiveAction::DeleteFile(id),
                ));
            }
        }
        ArchiveAction::DeleteFile(id) => {
            // Requests dropped by logout are no longer marked.
            if !state.is_deleting(id) {
                return Ok(effects);
            }
            state.deleting.retain(|pending| *pending != id);
            if let Ok(removed) = state.catalog.delete_by_id(id) {
                effects.push(ArchiveEffect::Notify(Notice::info(
                    "Файл удален",
                    format!("Файл {} был успешно удален.", removed.name),
                )));
            }
        }
        ArchiveAction::DeleteFilesNamed(name) => {
            ensure_logged_in(state)?;
            if state.catalog.delete_by_name(&name) > 0 {
                effects.push(ArchiveEffect::Notify(Notice::info(
                    "Файл удален",
                    format!("Файл {name} был успешно удален."),
                )));
            }
        }
        ArchiveAction::DownloadFile(id) => {
            let record = state.catalog.get(id).ok_or(CatalogError::FileNotFound)?;
            effects.push(ArchiveEffect::Notify(Notice::info(
                "Загрузка файла",
                format!("Файл {} скачивается...", record.name),
            )));
        }
    }

    Ok(effects)
}

fn schedule(delay_ms: u32, action: ArchiveAction) -> ArchiveEffect {
    ArchiveEffect::Schedule {
        delay_ms,
        action: Box::new(action),
    }
}

/// Clears the in-flight request if it is `expected`. Completions for requests that were
/// cancelled or replaced return `false`.
fn take_pending(state: &mut ArchiveState, expected: PendingRequest) -> bool {
    if state.pending == Some(expected) {
        state.pending = None;
        true
    } else {
        false
    }
}

fn ensure_idle(state: &ArchiveState) -> Result<(), ArchiveError> {
    match state.pending {
        Some(_) => Err(ArchiveError::Busy),
        None => Ok(()),
    }
}

fn ensure_logged_in(state: &ArchiveState) -> Result<(), ArchiveError> {
    if state.session.is_logged_in() {
        Ok(())
    } else {
        Err(ArchiveError::NotLoggedIn)
    }
}

fn resolve_route(state: &mut ArchiveState, requested: Route) -> Route {
    let resolved = match guard(requested, &state.session) {
        RouteDecision::Allow => requested,
        RouteDecision::Redirect(target) => target,
    };
    state.route = resolved;
    resolved
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{model::NoticeVariant, validation::FormField};

    fn dispatch(state: &mut ArchiveState, action: ArchiveAction) -> Vec<ArchiveEffect> {
        reduce_archive(state, action).expect("action accepted")
    }

    /// Runs every scheduled follow-up action immediately, like a zero-delay runtime.
    fn dispatch_settled(state: &mut ArchiveState, action: ArchiveAction) -> Vec<ArchiveEffect> {
        let mut all = Vec::new();
        let mut queue = vec![action];
        while let Some(next) = queue.pop() {
            for effect in dispatch(state, next) {
                if let ArchiveEffect::Schedule { action, .. } = &effect {
                    queue.push((**action).clone());
                }
                all.push(effect);
            }
        }
        all
    }

    fn logged_in_state() -> ArchiveState {
        let mut state = ArchiveState::default();
        dispatch_settled(
            &mut state,
            ArchiveAction::SubmitLogin(LoginForm {
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
                remember_me: false,
            }),
        );
        state
    }

    fn registration_form() -> RegistrationForm {
        RegistrationForm {
            full_name: "Ivan Ivanov".to_string(),
            email: "a@b.com".to_string(),
            password: "password1".to_string(),
            confirm_password: "password1".to_string(),
        }
    }

    fn notices(effects: &[ArchiveEffect]) -> Vec<&Notice> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                ArchiveEffect::Notify(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn login_is_delayed_then_persists_and_navigates() {
        let mut state = ArchiveState::default();
        let effects = dispatch(
            &mut state,
            ArchiveAction::SubmitLogin(LoginForm {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
                remember_me: true,
            }),
        );
        assert_eq!(state.pending, Some(PendingRequest::Login));
        assert_eq!(
            state.session,
            SessionState::Authenticating {
                email: "a@b.com".to_string(),
            }
        );
        assert_eq!(
            effects,
            vec![ArchiveEffect::Schedule {
                delay_ms: 1000,
                action: Box::new(ArchiveAction::CompleteLogin(LoginCredentials {
                    email: "a@b.com".to_string(),
                    remember_me: true,
                })),
            }]
        );

        let effects = dispatch(
            &mut state,
            ArchiveAction::CompleteLogin(LoginCredentials {
                email: "a@b.com".to_string(),
                remember_me: true,
            }),
        );
        assert!(state.session.is_logged_in());
        assert_eq!(state.pending, None);
        assert_eq!(state.route, Route::Cloud);
        assert!(effects.contains(&ArchiveEffect::PersistSession(Session {
            email: "a@b.com".to_string(),
            full_name: None,
        })));
        assert!(effects.contains(&ArchiveEffect::NavigateTo(Route::Cloud)));
    }

    #[test]
    fn invalid_login_is_rejected_with_field_errors() {
        let mut state = ArchiveState::default();
        let err = reduce_archive(
            &mut state,
            ArchiveAction::SubmitLogin(LoginForm {
                email: "bad".to_string(),
                password: String::new(),
                remember_me: false,
            }),
        )
        .expect_err("invalid");
        let ArchiveError::Validation(errors) = &err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(errors.has(FormField::Email));
        assert!(errors.has(FormField::Password));
    }

    #[test]
    fn second_submit_while_pending_is_busy() {
        let mut state = ArchiveState::default();
        dispatch(
            &mut state,
            ArchiveAction::SubmitRegistration(registration_form()),
        );
        assert_eq!(
            reduce_archive(
                &mut state,
                ArchiveAction::SubmitRegistration(registration_form())
            ),
            Err(ArchiveError::Busy)
        );
    }

    #[test]
    fn registration_then_correct_code_logs_in() {
        let mut state = ArchiveState::default();
        let effects = dispatch_settled(
            &mut state,
            ArchiveAction::SubmitRegistration(registration_form()),
        );
        assert!(effects.contains(&ArchiveEffect::StartResendCountdown));
        assert_eq!(state.session.email(), Some("a@b.com"));
        assert!(state.session.challenge().is_some());
        assert!(!state.session.is_logged_in());

        let effects = dispatch_settled(
            &mut state,
            ArchiveAction::SubmitVerificationCode("123".to_string()),
        );
        assert_eq!(
            state.session,
            SessionState::LoggedIn(Session {
                email: "a@b.com".to_string(),
                full_name: Some("Ivan Ivanov".to_string()),
            })
        );
        assert!(effects.contains(&ArchiveEffect::StopResendCountdown));
        assert!(effects.contains(&ArchiveEffect::NavigateTo(Route::Cloud)));
        assert_eq!(state.route, Route::Cloud);
    }

    #[test]
    fn wrong_code_notifies_and_stays_pending() {
        let mut state = ArchiveState::default();
        dispatch_settled(
            &mut state,
            ArchiveAction::SubmitRegistration(registration_form()),
        );
        let effects = dispatch_settled(
            &mut state,
            ArchiveAction::SubmitVerificationCode("321".to_string()),
        );
        let shown = notices(&effects);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Неверный код");
        assert_eq!(shown[0].variant, NoticeVariant::Destructive);
        assert!(state.session.challenge().is_some());
        assert_eq!(state.pending, None);
    }

    #[test]
    fn incomplete_code_is_rejected_without_delay() {
        let mut state = ArchiveState::default();
        dispatch_settled(
            &mut state,
            ArchiveAction::SubmitRegistration(registration_form()),
        );
        assert_eq!(
            reduce_archive(
                &mut state,
                ArchiveAction::SubmitVerificationCode("12".to_string())
            ),
            Err(ArchiveError::Verification(
                VerificationError::IncompleteCode { expected: 3 }
            ))
        );
    }

    #[test]
    fn resend_waits_for_countdown() {
        let mut state = ArchiveState::default();
        state.config.resend_cooldown_secs = 2;
        dispatch_settled(
            &mut state,
            ArchiveAction::SubmitRegistration(registration_form()),
        );

        let err = reduce_archive(&mut state, ArchiveAction::RequestResendCode).expect_err("early");
        assert!(err.user_notice().is_some());

        assert_eq!(dispatch(&mut state, ArchiveAction::TickResendCountdown), vec![]);
        assert_eq!(
            dispatch(&mut state, ArchiveAction::TickResendCountdown),
            vec![ArchiveEffect::StopResendCountdown]
        );

        let effects = dispatch_settled(&mut state, ArchiveAction::RequestResendCode);
        assert!(effects.contains(&ArchiveEffect::StartResendCountdown));
        assert_eq!(
            state.session.challenge().map(|c| c.remaining_secs()),
            Some(2)
        );
    }

    #[test]
    fn cloud_route_redirects_until_logged_in() {
        let mut state = ArchiveState::default();
        let effects = dispatch(&mut state, ArchiveAction::Navigate(Route::Cloud));
        assert_eq!(state.route, Route::Login);
        assert_eq!(effects, vec![ArchiveEffect::NavigateTo(Route::Login)]);

        let mut state = logged_in_state();
        let effects = dispatch(&mut state, ArchiveAction::Navigate(Route::Cloud));
        assert_eq!(state.route, Route::Cloud);
        assert!(effects.is_empty());
    }

    #[test]
    fn hydrated_session_unlocks_current_route() {
        let mut state = ArchiveState::default();
        dispatch(
            &mut state,
            ArchiveAction::HydrateSession(SessionState::LoggedIn(Session {
                email: "a@b.com".to_string(),
                full_name: None,
            })),
        );
        dispatch(&mut state, ArchiveAction::Navigate(Route::Cloud));
        assert_eq!(state.route, Route::Cloud);
    }

    #[test]
    fn start_work_depends_on_session() {
        let mut state = ArchiveState::default();
        dispatch(&mut state, ArchiveAction::StartWork);
        assert!(state.login_dialog_open);

        let mut state = logged_in_state();
        assert_eq!(
            dispatch(&mut state, ArchiveAction::StartWork),
            vec![ArchiveEffect::NavigateTo(Route::Cloud)]
        );
    }

    #[test]
    fn logout_clears_session_and_aborts_upload() {
        let mut state = logged_in_state();
        dispatch(
            &mut state,
            ArchiveAction::SelectFile(Some(SelectedFile::named("a.txt"))),
        );
        dispatch(&mut state, ArchiveAction::StartUpload);
        let effects = dispatch(&mut state, ArchiveAction::Logout);
        assert_eq!(state.session, SessionState::LoggedOut);
        assert_eq!(state.upload, None);
        assert!(effects.contains(&ArchiveEffect::AbortUpload(UploadId(1))));
        assert!(effects.contains(&ArchiveEffect::ClearPersistedSession));
        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn upload_without_selection_is_rejected_with_notice() {
        let mut state = logged_in_state();
        let err = reduce_archive(&mut state, ArchiveAction::StartUpload).expect_err("no file");
        assert_eq!(err, ArchiveError::Upload(UploadError::NoFileSelected));
        assert_eq!(
            err.user_notice().map(|n| n.title),
            Some("Файл не выбран".to_string())
        );
    }

    #[test]
    fn completed_upload_prepends_record() {
        let mut state = logged_in_state();
        dispatch(&mut state, ArchiveAction::OpenUploadDialog);
        dispatch(
            &mut state,
            ArchiveAction::SelectFile(Some(SelectedFile::named("report.pdf"))),
        );
        let effects = dispatch(&mut state, ArchiveAction::StartUpload);
        let ArchiveEffect::StartUploadTicker { task, tick_ms } = &effects[0] else {
            panic!("expected ticker effect, got {effects:?}");
        };
        assert_eq!(*tick_ms, 150);

        let mut runner_task = task.clone();
        loop {
            let event = runner_task.advance();
            let done = matches!(event, UploadEvent::Completed { .. });
            let effects = dispatch(&mut state, ArchiveAction::Upload(event));
            if done {
                assert_eq!(notices(&effects)[0].title, "Загрузка завершена");
                break;
            }
            assert_eq!(
                state.upload.as_ref().map(UploadTask::progress),
                Some(runner_task.progress())
            );
        }

        assert!(!state.upload_dialog_open);
        assert_eq!(state.upload, None);
        let newest = &state.catalog.files()[0];
        assert_eq!(newest.name, "report.pdf");
        assert_eq!(newest.file_type, "pdf");
        assert_eq!(newest.size, "1.2 МБ");
        assert_eq!(newest.id, FileId(6));
        assert!(!newest.date_added.is_empty());

        dispatch(&mut state, ArchiveAction::SetSearchTerm("REPORT".to_string()));
        assert_eq!(state.visible_files().len(), 1);
    }

    #[test]
    fn closing_dialog_aborts_and_ignores_late_ticks() {
        let mut state = logged_in_state();
        dispatch(
            &mut state,
            ArchiveAction::SelectFile(Some(SelectedFile {
                name: "big.zip".to_string(),
                size_bytes: Some(2 * 1024 * 1024),
            })),
        );
        dispatch(&mut state, ArchiveAction::StartUpload);
        let effects = dispatch(&mut state, ArchiveAction::CloseUploadDialog);
        assert_eq!(effects, vec![ArchiveEffect::AbortUpload(UploadId(1))]);

        let before = state.catalog.clone();
        let late = dispatch(
            &mut state,
            ArchiveAction::Upload(UploadEvent::Completed {
                id: UploadId(1),
                file: SelectedFile::named("big.zip"),
            }),
        );
        assert!(late.is_empty());
        assert_eq!(state.catalog, before);
    }

    #[test]
    fn uploaded_record_gets_placeholder_size() {
        let mut state = logged_in_state();
        let picked = SelectedFile {
            name: "scan.png".to_string(),
            size_bytes: Some(2 * 1024 * 1024),
        };
        assert_eq!(
            picked.size_label(state.config.locale),
            Some("2.00 МБ".to_string())
        );
        dispatch(&mut state, ArchiveAction::SelectFile(Some(picked.clone())));
        dispatch(&mut state, ArchiveAction::StartUpload);
        dispatch(
            &mut state,
            ArchiveAction::Upload(UploadEvent::Completed {
                id: UploadId(1),
                file: picked,
            }),
        );
        assert_eq!(state.catalog.files()[0].size, "1.2 МБ");
    }

    #[test]
    fn blank_file_name_never_starts_an_upload() {
        let mut state = logged_in_state();
        assert_eq!(
            reduce_archive(
                &mut state,
                ArchiveAction::SelectFile(Some(SelectedFile::named(" ")))
            ),
            Err(ArchiveError::Catalog(CatalogError::EmptyName))
        );
        assert_eq!(
            reduce_archive(&mut state, ArchiveAction::StartUpload),
            Err(ArchiveError::Upload(UploadError::NoFileSelected))
        );
        assert_eq!(state.upload, None);

        dispatch(
            &mut state,
            ArchiveAction::SelectFile(Some(SelectedFile::named("notes.txt"))),
        );
        let effects = dispatch(&mut state, ArchiveAction::StartUpload);
        assert!(matches!(
            effects.as_slice(),
            [ArchiveEffect::StartUploadTicker { .. }]
        ));
    }

    #[test]
    fn failed_completion_leaves_upload_state_untouched() {
        let mut state = logged_in_state();
        dispatch(
            &mut state,
            ArchiveAction::SelectFile(Some(SelectedFile::named("a.txt"))),
        );
        dispatch(&mut state, ArchiveAction::StartUpload);
        let before = state.clone();
        assert_eq!(
            reduce_archive(
                &mut state,
                ArchiveAction::Upload(UploadEvent::Completed {
                    id: UploadId(1),
                    file: SelectedFile::named(""),
                })
            ),
            Err(ArchiveError::Catalog(CatalogError::EmptyName))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn login_completing_after_logout_is_ignored() {
        let mut state = ArchiveState::default();
        let effects = dispatch(
            &mut state,
            ArchiveAction::SubmitLogin(LoginForm {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
                remember_me: false,
            }),
        );
        dispatch(&mut state, ArchiveAction::Logout);

        let [ArchiveEffect::Schedule { action, .. }] = effects.as_slice() else {
            panic!("expected a scheduled completion, got {effects:?}");
        };
        let late = dispatch(&mut state, (**action).clone());
        assert!(late.is_empty());
        assert_eq!(state.session, SessionState::LoggedOut);
        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn registration_completing_after_logout_is_ignored() {
        let mut state = ArchiveState::default();
        let effects = dispatch(
            &mut state,
            ArchiveAction::SubmitRegistration(registration_form()),
        );
        dispatch(&mut state, ArchiveAction::Logout);
        let [ArchiveEffect::Schedule { action, .. }] = effects.as_slice() else {
            panic!("expected a scheduled completion, got {effects:?}");
        };
        assert!(dispatch(&mut state, (**action).clone()).is_empty());
        assert_eq!(state.session.challenge(), None);
    }

    #[test]
    fn delete_queued_before_logout_is_dropped() {
        let mut state = logged_in_state();
        dispatch(&mut state, ArchiveAction::RequestDelete(FileId(1)));
        dispatch(&mut state, ArchiveAction::Logout);
        assert!(state.deleting.is_empty());

        let mut state_after = state.clone();
        dispatch_settled(
            &mut state_after,
            ArchiveAction::SubmitLogin(LoginForm {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
                remember_me: false,
            }),
        );
        assert!(dispatch(&mut state_after, ArchiveAction::DeleteFile(FileId(1))).is_empty());
        assert!(state_after.catalog.get(FileId(1)).is_some());
    }

    #[test]
    fn catalog_actions_require_session() {
        let mut state = ArchiveState::default();
        assert_eq!(
            reduce_archive(&mut state, ArchiveAction::AddFile("a.txt".to_string())),
            Err(ArchiveError::NotLoggedIn)
        );
        assert_eq!(
            reduce_archive(&mut state, ArchiveAction::OpenUploadDialog),
            Err(ArchiveError::NotLoggedIn)
        );
    }

    #[test]
    fn delayed_delete_removes_only_the_requested_id() {
        let mut state = logged_in_state();
        dispatch(&mut state, ArchiveAction::AddFile("dup.txt".to_string()));
        dispatch(&mut state, ArchiveAction::AddFile("dup.txt".to_string()));
        let target = state.catalog.files()[0].id;

        let effects = dispatch(&mut state, ArchiveAction::RequestDelete(target));
        assert!(state.is_deleting(target));
        assert_eq!(
            effects,
            vec![ArchiveEffect::Schedule {
                delay_ms: 500,
                action: Box::new(ArchiveAction::DeleteFile(target)),
            }]
        );
        assert!(dispatch(&mut state, ArchiveAction::RequestDelete(target)).is_empty());

        let effects = dispatch(&mut state, ArchiveAction::DeleteFile(target));
        assert_eq!(notices(&effects)[0].description, "Файл dup.txt был успешно удален.");
        assert!(!state.is_deleting(target));
        assert_eq!(state.catalog.search("dup.txt").len(), 1);
    }

    #[test]
    fn delete_by_name_and_missing_ids() {
        let mut state = logged_in_state();
        dispatch(&mut state, ArchiveAction::AddFile("dup.txt".to_string()));
        dispatch(&mut state, ArchiveAction::AddFile("dup.txt".to_string()));
        dispatch(&mut state, ArchiveAction::DeleteFilesNamed("dup.txt".to_string()));
        assert!(state.catalog.search("dup.txt").is_empty());

        let before = state.catalog.clone();
        assert!(dispatch(&mut state, ArchiveAction::DeleteFilesNamed("nope".to_string())).is_empty());
        assert_eq!(
            reduce_archive(&mut state, ArchiveAction::RequestDelete(FileId(999))),
            Err(ArchiveError::Catalog(CatalogError::FileNotFound))
        );
        assert_eq!(state.catalog, before);
    }

    #[test]
    fn download_emits_notice() {
        let mut state = logged_in_state();
        let effects = dispatch(&mut state, ArchiveAction::DownloadFile(FileId(1)));
        assert_eq!(
            notices(&effects)[0].description,
            "Файл Отчет-Q3-2023.pdf скачивается..."
        );
    }

    #[test]
    fn hydrated_config_drives_delays() {
        let mut state = ArchiveState::default();
        dispatch(
            &mut state,
            ArchiveAction::HydrateConfig(ArchiveConfig {
                artificial_delay_ms: 10,
                ..ArchiveConfig::default()
            }),
        );
        let effects = dispatch(
            &mut state,
            ArchiveAction::SubmitRegistration(registration_form()),
        );
        assert!(matches!(
            effects.as_slice(),
            [ArchiveEffect::Schedule { delay_ms: 10, .. }]
        ));
    }

    #[test]
    fn view_mode_and_search_are_plain_state() {
        let mut state = ArchiveState::default();
        dispatch(&mut state, ArchiveAction::SetViewMode(ViewMode::Grid));
        dispatch(&mut state, ArchiveAction::SetSearchTerm("zip".to_string()));
        assert_eq!(state.view_mode, ViewMode::Grid);
        assert_eq!(state.visible_files().len(), 1);
    }
}
