//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only ever talk to
//! domain services, so they stay testable against the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{
    CategoryRepository, ClassRepository, EntryRepository, PupilRepository, ReportRenderer,
    SchoolYearRepository, SnapshotRepository,
};
use crate::domain::{
    CategoryService, ClassService, DataTransferService, EntryService, PupilService,
    ReportService, SchoolYearService,
};

/// Parameter object bundling the driven ports the services need.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub school_years: Arc<dyn SchoolYearRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub pupils: Arc<dyn PupilRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub entries: Arc<dyn EntryRepository>,
    pub snapshots: Arc<dyn SnapshotRepository>,
    pub pdf: Arc<dyn ReportRenderer>,
    pub docx: Arc<dyn ReportRenderer>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub school_years: SchoolYearService,
    pub classes: ClassService,
    pub pupils: PupilService,
    pub categories: CategoryService,
    pub entries: EntryService,
    pub reports: ReportService,
    pub transfer: DataTransferService,
    pub pdf: Arc<dyn ReportRenderer>,
    pub docx: Arc<dyn ReportRenderer>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Wire every service over the given ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use pupil_tracker::inbound::http::state::{HttpState, HttpStatePorts};
    /// use pupil_tracker::outbound::documents::{DocxRenderer, PdfRenderer};
    /// use pupil_tracker::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::new(HttpStatePorts {
    ///     school_years: store.clone(),
    ///     classes: store.clone(),
    ///     pupils: store.clone(),
    ///     categories: store.clone(),
    ///     entries: store.clone(),
    ///     snapshots: store,
    ///     pdf: Arc::new(PdfRenderer),
    ///     docx: Arc::new(DocxRenderer),
    /// });
    /// let _reports = state.reports.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            school_years,
            classes,
            pupils,
            categories,
            entries,
            snapshots,
            pdf,
            docx,
        } = ports;
        Self {
            school_years: SchoolYearService::new(school_years.clone()),
            classes: ClassService::new(classes.clone(), school_years),
            pupils: PupilService::new(pupils.clone(), classes.clone()),
            categories: CategoryService::new(categories.clone()),
            entries: EntryService::new(entries.clone(), pupils.clone(), categories.clone()),
            reports: ReportService::new(pupils, classes, categories, entries),
            transfer: DataTransferService::new(snapshots),
            pdf,
            docx,
        }
    }
}
