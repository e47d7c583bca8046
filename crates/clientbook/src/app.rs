//! The client book: entry points the presentation layer calls into.
//!
//! [`ClientBook`] wires the form tracker, the record store and the transfer
//! buffer together behind one method per user action: a field losing focus,
//! submitting the form, clicking "edit" or "delete" on a listed client, and
//! opening a view. Store failures never escape these methods; each one is
//! logged and turned into a banner on the [`NoticeBoard`], leaving the
//! screen as it was.

use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::client::{ClientRecord, Field};
use crate::config::Config;
use crate::error::Error;
use crate::form::{BlurOutcome, FormState, SubmitControl};
use crate::notice::{Alert, Notice, NoticeBoard, NoticeKind, Region};
use crate::storage::{ClientRepository, RecordStore};
use crate::transfer::{FileArea, KeyValueArea, TransferBuffer};

/// Which form is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Registering a new client.
    #[default]
    Create,
    /// Changing the client parked in the transfer slot.
    Edit,
}

impl FormMode {
    /// Label of the submit control for this mode.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Save",
            Self::Edit => "Save Changes",
        }
    }

    /// Recover the mode from a submit control label.
    #[must_use]
    pub fn from_submit_label(label: &str) -> Option<Self> {
        match label {
            "Save" => Some(Self::Create),
            "Save Changes" => Some(Self::Edit),
            _ => None,
        }
    }
}

/// A screen the presentation layer should switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The client list.
    List,
    /// The form for a new client.
    CreateForm,
    /// The form for editing the parked client.
    EditForm,
}

/// Result of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was not ready; nothing was sent to the store.
    NotReady,
    /// Some fields still carry an error; nothing was sent to the store.
    Invalid {
        /// The fields that need fixing, in form order.
        fields: Vec<Field>,
    },
    /// A new client was stored under this id.
    Created {
        /// Id assigned by the store.
        id: i64,
    },
    /// An existing client was replaced.
    Updated {
        /// Id of the updated client.
        id: i64,
        /// Where to go next.
        navigate: View,
    },
    /// The store rejected the operation; the form is unchanged.
    Failed,
}

impl SubmitOutcome {
    /// Why the submit was refused before reaching the store, if it was.
    #[must_use]
    pub fn refusal(&self, label: &str) -> Option<String> {
        match self {
            Self::NotReady => Some(format!("{label} is disabled until every field is filled in")),
            Self::Invalid { fields } => {
                let names: Vec<&str> = fields.iter().map(|f| f.label()).collect();
                Some(format!(
                    "{label} is blocked until these fields are fixed: {}",
                    names.join(", ")
                ))
            }
            _ => None,
        }
    }
}

/// The user-facing core of the application.
#[derive(Debug)]
pub struct ClientBook<R, A> {
    repository: R,
    transfer: TransferBuffer<A>,
    form: FormState,
    mode: FormMode,
    notices: NoticeBoard,
    notice_lifetime: Duration,
}

impl ClientBook<RecordStore, FileArea> {
    /// Open the store and transfer area named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an [`Alert`] if either cannot be opened. Persistence is
    /// unavailable for the session in that case; there is no retry.
    pub async fn start(config: &Config, mode: FormMode) -> Result<Self, Alert> {
        let repository = RecordStore::open(config.database_path())
            .await
            .map_err(|e| startup_alert("the database", &e))?;
        let area = FileArea::open(config.transfer_area_path())
            .map_err(|e| startup_alert("local storage", &e))?;

        info!(?mode, "client book started");
        Ok(Self::new(repository, area, mode, config.notice_lifetime()))
    }
}

fn startup_alert(what: &str, err: &Error) -> Alert {
    tracing::error!(error = %err, "failed to open {what}");
    Alert {
        message: format!("Error opening {what}: {err}"),
    }
}

impl<R: ClientRepository, A: KeyValueArea> ClientBook<R, A> {
    /// Assemble a client book from its parts.
    pub fn new(repository: R, area: A, mode: FormMode, notice_lifetime: Duration) -> Self {
        Self {
            repository,
            transfer: TransferBuffer::new(area),
            form: FormState::new(),
            mode,
            notices: NoticeBoard::new(),
            notice_lifetime,
        }
    }

    /// Current form mode.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Label the submit control should show.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        self.mode.submit_label()
    }

    /// State of the in-progress form.
    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Current submit control state.
    #[must_use]
    pub fn submit_control(&self) -> SubmitControl {
        self.form.submit_control()
    }

    /// The transfer buffer.
    #[must_use]
    pub fn transfer(&self) -> &TransferBuffer<A> {
        &self.transfer
    }

    /// The backing repository.
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Banners still visible now.
    pub fn notices(&mut self) -> &[Notice] {
        self.notices.active(Utc::now())
    }

    /// Every banner raised and not yet replaced, expired or not.
    #[must_use]
    pub fn notice_board(&self) -> &NoticeBoard {
        &self.notices
    }

    fn success(&mut self, region: Region, message: impl Into<String>) {
        self.notices
            .post(Notice::success(region, message, self.notice_lifetime));
    }

    fn error(&mut self, region: Region, message: impl Into<String>) {
        self.notices
            .post(Notice::error(region, message, self.notice_lifetime));
    }

    /// Prepare the edit form: pre-fill it with the parked client.
    ///
    /// Does nothing in create mode. The slot is left occupied; it is only
    /// cleared by a successful update.
    pub fn load_edit_page(&mut self) -> Option<ClientRecord> {
        if self.mode != FormMode::Edit {
            return None;
        }
        match self.transfer.take() {
            Ok(Some(record)) => {
                self.form.prefill(&record);
                Some(record)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not read transfer slot");
                self.error(Region::Form, "ERROR: Could not load the client to edit");
                None
            }
        }
    }

    /// A form field lost focus with the given raw value.
    pub fn on_field_blur(&mut self, field: Field, raw: &str) -> BlurOutcome {
        let outcome = self.form.on_field_blur(field, raw);
        match outcome.error {
            Some(error) => self.error(Region::Field(field), error.message(field)),
            None => self.notices.dismiss(Region::Field(field), NoticeKind::Error),
        }
        outcome
    }

    /// The form was submitted.
    ///
    /// Refused without touching the store while a field is empty or still
    /// carries an error.
    pub async fn on_submit(&mut self) -> SubmitOutcome {
        if !self.form.is_ready() {
            return SubmitOutcome::NotReady;
        }
        if self.form.has_errors() {
            let fields = self.form.invalid_fields();
            warn!(?fields, "submit refused with outstanding field errors");
            return SubmitOutcome::Invalid { fields };
        }
        match self.mode {
            FormMode::Create => self.submit_create().await,
            FormMode::Edit => self.submit_update().await,
        }
    }

    async fn submit_create(&mut self) -> SubmitOutcome {
        let client = self.form.to_new_client();
        match self.repository.create(client).await {
            Ok(id) => {
                info!(id, "client created");
                self.success(Region::Form, "The client was saved successfully");
                self.form.reset();
                SubmitOutcome::Created { id }
            }
            Err(e) => {
                warn!(error = %e, "create failed");
                self.error(Region::Form, "ERROR: Could not save the client");
                SubmitOutcome::Failed
            }
        }
    }

    async fn submit_update(&mut self) -> SubmitOutcome {
        let id = match self.transfer.take() {
            Ok(Some(parked)) => parked.id,
            Ok(None) => {
                self.error(Region::Form, "ERROR: No client selected for editing");
                return SubmitOutcome::Failed;
            }
            Err(e) => {
                warn!(error = %e, "could not read transfer slot");
                self.error(Region::Form, "ERROR: Could not load the client to edit");
                return SubmitOutcome::Failed;
            }
        };

        let record = self.form.to_record(id);
        match self.repository.update(record).await {
            Ok(()) => {
                info!(id, "client updated");
                if let Err(e) = self.transfer.clear() {
                    warn!(error = %e, "could not clear transfer slot");
                }
                self.success(Region::Form, "The client was updated successfully");
                SubmitOutcome::Updated {
                    id,
                    navigate: View::List,
                }
            }
            Err(e) => {
                warn!(error = %e, id, "update failed");
                self.error(Region::Form, "ERROR: Could not update the client's data");
                SubmitOutcome::Failed
            }
        }
    }

    /// Load the client list.
    ///
    /// Returns `None` if the store could not be read, in which case the
    /// previously shown list stays as it was.
    pub async fn list_clients(&mut self) -> Option<Vec<ClientRecord>> {
        match self.repository.list_all().await {
            Ok(clients) => {
                if clients.is_empty() {
                    self.error(Region::List, "No clients found in the database");
                }
                Some(clients)
            }
            Err(e) => {
                warn!(error = %e, "listing failed");
                self.error(Region::List, "ERROR: Could not list the clients");
                None
            }
        }
    }

    /// Look up a single client for display.
    ///
    /// Returns `None` with an error notice if the client is missing or the
    /// store could not be read.
    pub async fn show_client(&mut self, id: i64) -> Option<ClientRecord> {
        match self.repository.get_by_id(id).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                self.error(
                    Region::List,
                    format!("ERROR: Client {id} was not found in the database"),
                );
                None
            }
            Err(e) => {
                warn!(error = %e, id, "lookup failed");
                self.error(
                    Region::List,
                    format!("ERROR: Could not look up client {id}"),
                );
                None
            }
        }
    }

    /// "Edit" was clicked on a listed client.
    ///
    /// Parks the client in the transfer slot and asks for the edit view.
    pub async fn on_edit_click(&mut self, id: i64) -> Option<View> {
        let record = self.show_client(id).await?;

        match self.transfer.put(&record) {
            Ok(()) => Some(View::EditForm),
            Err(e) => {
                warn!(error = %e, id, "could not fill transfer slot");
                self.error(Region::List, "ERROR: Could not open the client for editing");
                None
            }
        }
    }

    /// "Delete" was clicked on a listed client.
    ///
    /// Waits for the delete to finish before re-reading the list, so the
    /// returned list never shows the deleted client. Returns `None` if
    /// either step failed.
    pub async fn on_delete_click(&mut self, id: i64) -> Option<Vec<ClientRecord>> {
        match self.repository.delete_by_id(id).await {
            Ok(removed) => {
                info!(id, removed, "client delete finished");
            }
            Err(e) => {
                warn!(error = %e, id, "delete failed");
                self.error(Region::List, "ERROR: Could not delete the client");
                return None;
            }
        }
        self.list_clients().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::client::NewClient;
    use crate::error::Result;
    use crate::logging::init_test_logging;
    use crate::notice::DEFAULT_LIFETIME;
    use crate::transfer::MemoryArea;

    /// Repository that can be told to fail reads or writes.
    #[derive(Debug)]
    struct FlakyRepository {
        inner: RecordStore,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    fn engine_failure() -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
            None,
        )
    }

    impl FlakyRepository {
        fn read_guard(&self, operation: &'static str) -> Result<()> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(Error::store_read(operation, engine_failure()));
            }
            Ok(())
        }

        fn write_guard(&self, operation: &'static str) -> Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Error::store_write(operation, engine_failure()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ClientRepository for FlakyRepository {
        async fn create(&self, client: NewClient) -> Result<i64> {
            self.write_guard("save the client")?;
            self.inner.create(client).await
        }

        async fn list_all(&self) -> Result<Vec<ClientRecord>> {
            self.read_guard("list the clients")?;
            self.inner.list_all().await
        }

        async fn get_by_id(&self, id: i64) -> Result<Option<ClientRecord>> {
            self.read_guard("find the client")?;
            self.inner.get_by_id(id).await
        }

        async fn update(&self, record: ClientRecord) -> Result<()> {
            self.write_guard("update the client")?;
            self.inner.update(record).await
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool> {
            self.write_guard("delete the client")?;
            self.inner.delete_by_id(id).await
        }
    }

    type TestBook = ClientBook<FlakyRepository, MemoryArea>;

    async fn book(mode: FormMode) -> TestBook {
        init_test_logging();
        let repository = FlakyRepository {
            inner: RecordStore::open_in_memory().await.unwrap(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        };
        ClientBook::new(repository, MemoryArea::new(), mode, DEFAULT_LIFETIME)
    }

    fn fill(book: &mut TestBook, name: &str) {
        book.on_field_blur(Field::Name, name);
        book.on_field_blur(Field::Email, "client@example.com");
        book.on_field_blur(Field::Phone, "612345678");
        book.on_field_blur(Field::CompanyCode, "123456");
    }

    async fn seed(book: &TestBook, name: &str) -> i64 {
        book.repository()
            .inner
            .create(NewClient::new(name, "client@example.com", "612345678", "123456"))
            .await
            .unwrap()
    }

    fn last_message(book: &TestBook) -> &str {
        &book.notice_board().all().last().unwrap().message
    }

    #[test]
    fn test_form_mode_labels() {
        assert_eq!(FormMode::Create.submit_label(), "Save");
        assert_eq!(FormMode::Edit.submit_label(), "Save Changes");
        assert_eq!(FormMode::from_submit_label("Save Changes"), Some(FormMode::Edit));
        assert_eq!(FormMode::from_submit_label("Guardar"), None);
    }

    #[tokio::test]
    async fn test_submit_refused_until_ready() {
        let mut book = book(FormMode::Create).await;
        book.on_field_blur(Field::Name, "Ana");

        assert_eq!(book.on_submit().await, SubmitOutcome::NotReady);
        assert!(book.repository().inner.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_stores_client_and_resets_form() {
        let mut book = book(FormMode::Create).await;
        fill(&mut book, "Ana Lopez");

        let outcome = book.on_submit().await;
        let SubmitOutcome::Created { id } = outcome else {
            panic!("expected create, got {outcome:?}");
        };

        let stored = book.repository().inner.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ana Lopez");
        assert!(!book.form().is_ready());
        assert!(!book.submit_control().enabled);
        assert_eq!(last_message(&book), "The client was saved successfully");
    }

    #[tokio::test]
    async fn test_create_failure_keeps_form() {
        let mut book = book(FormMode::Create).await;
        fill(&mut book, "Ana");
        book.repository().fail_writes.store(true, Ordering::SeqCst);

        assert_eq!(book.on_submit().await, SubmitOutcome::Failed);
        assert!(book.form().is_ready());
        assert_eq!(book.form().value(Field::Name), "Ana");
        let notice = book.notice_board().all().last().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.region, Region::Form);
    }

    #[tokio::test]
    async fn test_blur_errors_become_field_notices() {
        let mut book = book(FormMode::Create).await;
        book.on_field_blur(Field::Email, "");
        book.on_field_blur(Field::CompanyCode, "12");

        let notices = book.notices().to_vec();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].region, Region::Field(Field::Email));
        assert_eq!(notices[0].message, "The email field cannot be empty");
        assert!(notices[1].message.contains("6 digits"));

        book.on_field_blur(Field::Email, "ana@example.com");
        assert_eq!(book.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_click_parks_client() {
        let mut book = book(FormMode::Create).await;
        let id = seed(&book, "Ana").await;

        assert_eq!(book.on_edit_click(id).await, Some(View::EditForm));
        assert_eq!(book.transfer().take().unwrap().unwrap().id, id);
    }

    #[tokio::test]
    async fn test_edit_click_unknown_id() {
        let mut book = book(FormMode::Create).await;

        assert_eq!(book.on_edit_click(99).await, None);
        assert_eq!(book.transfer().take().unwrap(), None);
        assert!(last_message(&book).contains("99"));
    }

    #[tokio::test]
    async fn test_edit_click_read_failure() {
        let mut book = book(FormMode::Create).await;
        let id = seed(&book, "Ana").await;
        book.repository().fail_reads.store(true, Ordering::SeqCst);

        assert_eq!(book.on_edit_click(id).await, None);
        assert!(book.notice_board().all().last().unwrap().is_error());
    }

    async fn edit_book_for(name: &str) -> (TestBook, i64) {
        let mut book = book(FormMode::Edit).await;
        let id = seed(&book, name).await;
        book.on_edit_click(id).await.unwrap();
        (book, id)
    }

    #[tokio::test]
    async fn test_load_edit_page_prefills_form() {
        let (mut book, id) = edit_book_for("Ana").await;

        let record = book.load_edit_page().unwrap();
        assert_eq!(record.id, id);
        assert!(book.form().is_ready());
        assert_eq!(book.form().value(Field::Name), "Ana");
        // Loading does not consume the slot.
        assert!(book.transfer().take().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_load_edit_page_in_create_mode_is_noop() {
        let mut book = book(FormMode::Create).await;
        let id = seed(&book, "Ana").await;
        book.on_edit_click(id).await.unwrap();

        assert_eq!(book.load_edit_page(), None);
        assert!(!book.form().is_ready());
    }

    #[tokio::test]
    async fn test_update_success_clears_slot_and_navigates() {
        let (mut book, id) = edit_book_for("Ana").await;
        book.load_edit_page();
        book.on_field_blur(Field::Email, "ana@work.es");

        let outcome = book.on_submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Updated {
                id,
                navigate: View::List
            }
        );
        assert_eq!(book.transfer().take().unwrap(), None);

        let stored = book.repository().inner.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.email, "ana@work.es");
        assert_eq!(book.repository().inner.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_slot_for_retry() {
        let (mut book, id) = edit_book_for("Ana").await;
        book.load_edit_page();
        book.repository().fail_writes.store(true, Ordering::SeqCst);

        assert_eq!(book.on_submit().await, SubmitOutcome::Failed);
        assert_eq!(book.transfer().take().unwrap().unwrap().id, id);

        book.repository().fail_writes.store(false, Ordering::SeqCst);
        assert!(matches!(
            book.on_submit().await,
            SubmitOutcome::Updated { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_of_deleted_client_fails() {
        let (mut book, id) = edit_book_for("Ana").await;
        book.load_edit_page();
        book.repository().inner.delete_by_id(id).await.unwrap();

        assert_eq!(book.on_submit().await, SubmitOutcome::Failed);
        assert!(book.repository().inner.list_all().await.unwrap().is_empty());
        assert!(book.transfer().take().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_without_parked_client() {
        let mut book = book(FormMode::Edit).await;
        fill(&mut book, "Ana");

        assert_eq!(book.on_submit().await, SubmitOutcome::Failed);
        assert!(last_message(&book).contains("No client selected"));
    }

    #[tokio::test]
    async fn test_rejected_override_blocks_update() {
        let (mut book, id) = edit_book_for("Ana").await;
        book.load_edit_page();
        let blur = book.on_field_blur(Field::Email, "not-an-email");
        assert!(blur.error.is_some());

        let outcome = book.on_submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid {
                fields: vec![Field::Email]
            }
        );
        assert!(outcome
            .refusal(book.submit_label())
            .unwrap()
            .contains("email"));
        // Nothing was written and the slot is still there for another try.
        let stored = book.repository().inner.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.email, "client@example.com");
        assert!(book.transfer().take().unwrap().is_some());

        book.on_field_blur(Field::Email, "ana@work.es");
        assert!(matches!(
            book.on_submit().await,
            SubmitOutcome::Updated { .. }
        ));
    }

    #[tokio::test]
    async fn test_whitespace_field_blocks_create() {
        let mut book = book(FormMode::Create).await;
        fill(&mut book, "Ana");
        book.on_field_blur(Field::Phone, "   ");

        assert!(book.form().is_ready());
        assert_eq!(
            book.on_submit().await,
            SubmitOutcome::Invalid {
                fields: vec![Field::Phone]
            }
        );
        assert!(book.repository().inner.list_all().await.unwrap().is_empty());
        let notice = book.notice_board().all().last().unwrap();
        assert_eq!(notice.region, Region::Field(Field::Phone));
        assert_eq!(notice.message, "The phone field cannot be empty");
    }

    #[test]
    fn test_refusal_messages() {
        assert!(SubmitOutcome::NotReady
            .refusal("Save")
            .unwrap()
            .starts_with("Save is disabled"));
        assert_eq!(SubmitOutcome::Created { id: 1 }.refusal("Save"), None);
        let invalid = SubmitOutcome::Invalid {
            fields: vec![Field::Name, Field::CompanyCode],
        };
        assert!(invalid
            .refusal("Save Changes")
            .unwrap()
            .ends_with("name, company code"));
    }

    #[tokio::test]
    async fn test_show_client() {
        let mut book = book(FormMode::Create).await;
        let id = seed(&book, "Ana").await;

        assert_eq!(book.show_client(id).await.unwrap().name, "Ana");
        assert_eq!(book.show_client(99).await, None);
        assert!(last_message(&book).contains("99"));
    }

    #[tokio::test]
    async fn test_show_client_read_failure_becomes_notice() {
        let mut book = book(FormMode::Create).await;
        let id = seed(&book, "Ana").await;
        book.repository().fail_reads.store(true, Ordering::SeqCst);

        assert_eq!(book.show_client(id).await, None);
        let notice = book.notice_board().all().last().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.region, Region::List);
    }

    #[tokio::test]
    async fn test_list_clients_empty_raises_notice() {
        let mut book = book(FormMode::Create).await;

        assert_eq!(book.list_clients().await, Some(Vec::new()));
        assert_eq!(last_message(&book), "No clients found in the database");
    }

    #[tokio::test]
    async fn test_list_clients_failure() {
        let mut book = book(FormMode::Create).await;
        seed(&book, "Ana").await;
        book.repository().fail_reads.store(true, Ordering::SeqCst);

        assert_eq!(book.list_clients().await, None);
        assert_eq!(last_message(&book), "ERROR: Could not list the clients");
    }

    #[tokio::test]
    async fn test_delete_then_relist() {
        let mut book = book(FormMode::Create).await;
        let keep = seed(&book, "Ana").await;
        let gone = seed(&book, "Bea").await;

        let clients = book.on_delete_click(gone).await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].id, keep);

        // Deleting again is not an error.
        let clients = book.on_delete_click(gone).await.unwrap();
        assert_eq!(clients.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_list_alone() {
        let mut book = book(FormMode::Create).await;
        let id = seed(&book, "Ana").await;
        book.repository().fail_writes.store(true, Ordering::SeqCst);

        assert_eq!(book.on_delete_click(id).await, None);
        assert_eq!(last_message(&book), "ERROR: Could not delete the client");
        assert!(book.repository().inner.get_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_start_with_unopenable_store_alerts() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        // A directory cannot be opened as a database file.
        config.storage.database_path = Some(dir.path().to_path_buf());
        config.transfer.area_path = Some(dir.path().join("area.json"));

        let alert = ClientBook::start(&config, FormMode::Create).await.unwrap_err();
        assert!(alert.message.contains("database"));
    }

    #[tokio::test]
    async fn test_start_opens_file_backed_book() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.database_path = Some(dir.path().join("clients.db"));
        config.transfer.area_path = Some(dir.path().join("area.json"));

        let mut book = ClientBook::start(&config, FormMode::Create).await.unwrap();
        assert_eq!(book.submit_label(), "Save");
        book.on_field_blur(Field::Name, "Ana");
        book.on_field_blur(Field::Email, "ana@example.com");
        book.on_field_blur(Field::Phone, "+34 612 345 678");
        book.on_field_blur(Field::CompanyCode, "123456");
        assert!(matches!(
            book.on_submit().await,
            SubmitOutcome::Created { id: 1 }
        ));
    }
}
