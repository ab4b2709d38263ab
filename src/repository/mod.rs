use crate::db::{DbConnection, DbPool};
use crate::domain::{
    audit::{AuditAction, AuditLog, NewAuditLog},
    campaign::{Campaign, Form, NewCampaign, NewForm},
    geo::{Aire, GeoHierarchy, Province, Zone},
    prestataire::{KycUpdate, NewPrestataire, PaymentUpdate, Prestataire, UpdatePrestataire},
    status::WorkflowStatus,
};
use crate::repository::errors::RepositoryResult;

pub mod audit;
pub mod campaign;
pub mod errors;
pub mod geo;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod prestataire;

/// Diesel-backed implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Filters accepted by the prestataire list endpoints. Every dashboard works
/// from this one query shape; role scoping just pre-fills zone/province.
#[derive(Debug, Clone, Default)]
pub struct PrestataireListQuery {
    pub campaign_id: Option<i32>,
    pub form_id: Option<i32>,
    pub province_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
    pub category: Option<String>,
    pub status: Option<WorkflowStatus>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl PrestataireListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn campaign(mut self, id: i32) -> Self {
        self.campaign_id = Some(id);
        self
    }

    pub fn form(mut self, id: i32) -> Self {
        self.form_id = Some(id);
        self
    }

    pub fn province(mut self, id: i32) -> Self {
        self.province_id = Some(id);
        self
    }

    pub fn zone(mut self, id: i32) -> Self {
        self.zone_id = Some(id);
        self
    }

    pub fn aire(mut self, id: i32) -> Self {
        self.aire_id = Some(id);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: WorkflowStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditLogListQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub pagination: Option<Pagination>,
}

impl AuditLogListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait PrestataireReader {
    fn get_prestataire_by_id(&self, id: i32) -> RepositoryResult<Option<Prestataire>>;
    fn get_prestataire_by_code(&self, code: &str) -> RepositoryResult<Option<Prestataire>>;
    fn list_prestataires(
        &self,
        query: PrestataireListQuery,
    ) -> RepositoryResult<(usize, Vec<Prestataire>)>;
}

pub trait PrestataireWriter {
    fn create_prestataires(&self, new_prestataires: &[NewPrestataire]) -> RepositoryResult<usize>;
    fn update_prestataire(
        &self,
        prestataire_id: i32,
        updates: &UpdatePrestataire,
    ) -> RepositoryResult<Prestataire>;
    fn set_workflow_status(
        &self,
        prestataire_id: i32,
        status: WorkflowStatus,
        comment: Option<&str>,
    ) -> RepositoryResult<Prestataire>;
    fn apply_payment_update(
        &self,
        prestataire_id: i32,
        update: &PaymentUpdate,
    ) -> RepositoryResult<Prestataire>;
    fn apply_kyc_update(
        &self,
        prestataire_id: i32,
        update: &KycUpdate,
    ) -> RepositoryResult<Prestataire>;
    fn set_payment_amount(
        &self,
        prestataire_id: i32,
        amount: f64,
        currency: &str,
    ) -> RepositoryResult<Prestataire>;
}

pub trait CampaignReader {
    fn get_campaign_by_id(&self, id: i32) -> RepositoryResult<Option<Campaign>>;
    fn list_campaigns(&self) -> RepositoryResult<Vec<Campaign>>;
    fn list_forms(&self, campaign_id: i32) -> RepositoryResult<Vec<Form>>;
    /// Enregistrement form of the active campaign: the explicitly selected
    /// one, or the campaign's latest form of kind `enregistrement`.
    fn get_active_enregistrement_form(&self) -> RepositoryResult<Option<Form>>;
}

pub trait CampaignWriter {
    fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign>;
    fn create_form(&self, new_form: &NewForm) -> RepositoryResult<Form>;
    fn set_active_campaign(&self, campaign_id: i32) -> RepositoryResult<Campaign>;
}

pub trait AuditLogReader {
    fn list_audit_logs(
        &self,
        query: AuditLogListQuery,
    ) -> RepositoryResult<(usize, Vec<AuditLog>)>;
}

pub trait AuditLogWriter {
    fn append_audit_log(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog>;
}

pub trait GeoReader {
    fn list_provinces(&self) -> RepositoryResult<Vec<Province>>;
    fn list_zones(&self, province_id: Option<i32>) -> RepositoryResult<Vec<Zone>>;
    fn list_aires(&self, zone_id: Option<i32>) -> RepositoryResult<Vec<Aire>>;
}

pub trait GeoWriter {
    /// Replaces missing reference rows from the given hierarchy, returning
    /// the number of created rows. Existing rows are matched by name.
    fn sync_hierarchy(&self, hierarchy: &GeoHierarchy) -> RepositoryResult<usize>;
}
