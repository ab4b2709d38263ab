//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::audit::{AuditLog, NewAuditLog};
use crate::domain::campaign::{Campaign, Form, NewCampaign, NewForm};
use crate::domain::geo::{Aire, GeoHierarchy, Province, Zone};
use crate::domain::prestataire::{
    KycUpdate, NewPrestataire, PaymentUpdate, Prestataire, UpdatePrestataire,
};
use crate::domain::status::WorkflowStatus;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuditLogListQuery, AuditLogReader, AuditLogWriter, CampaignReader, CampaignWriter, GeoReader,
    GeoWriter, PrestataireListQuery, PrestataireReader, PrestataireWriter,
};

mock! {
    pub Repository {}

    impl PrestataireReader for Repository {
        fn get_prestataire_by_id(&self, id: i32) -> RepositoryResult<Option<Prestataire>>;
        fn get_prestataire_by_code(&self, code: &str) -> RepositoryResult<Option<Prestataire>>;
        fn list_prestataires(
            &self,
            query: PrestataireListQuery,
        ) -> RepositoryResult<(usize, Vec<Prestataire>)>;
    }

    impl PrestataireWriter for Repository {
        fn create_prestataires(&self, new_prestataires: &[NewPrestataire]) -> RepositoryResult<usize>;
        fn update_prestataire(
            &self,
            prestataire_id: i32,
            updates: &UpdatePrestataire,
        ) -> RepositoryResult<Prestataire>;
        // The reference inside `Option` needs a named lifetime for mockall;
        // expectations see it as `Option<&'static str>`.
        fn set_workflow_status<'a>(
            &self,
            prestataire_id: i32,
            status: WorkflowStatus,
            comment: Option<&'a str>,
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

    impl CampaignReader for Repository {
        fn get_campaign_by_id(&self, id: i32) -> RepositoryResult<Option<Campaign>>;
        fn list_campaigns(&self) -> RepositoryResult<Vec<Campaign>>;
        fn list_forms(&self, campaign_id: i32) -> RepositoryResult<Vec<Form>>;
        fn get_active_enregistrement_form(&self) -> RepositoryResult<Option<Form>>;
    }

    impl CampaignWriter for Repository {
        fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign>;
        fn create_form(&self, new_form: &NewForm) -> RepositoryResult<Form>;
        fn set_active_campaign(&self, campaign_id: i32) -> RepositoryResult<Campaign>;
    }

    impl AuditLogReader for Repository {
        fn list_audit_logs(
            &self,
            query: AuditLogListQuery,
        ) -> RepositoryResult<(usize, Vec<AuditLog>)>;
    }

    impl AuditLogWriter for Repository {
        fn append_audit_log(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog>;
    }

    impl GeoReader for Repository {
        fn list_provinces(&self) -> RepositoryResult<Vec<Province>>;
        fn list_zones(&self, province_id: Option<i32>) -> RepositoryResult<Vec<Zone>>;
        fn list_aires(&self, zone_id: Option<i32>) -> RepositoryResult<Vec<Aire>>;
    }

    impl GeoWriter for Repository {
        fn sync_hierarchy(&self, hierarchy: &GeoHierarchy) -> RepositoryResult<usize>;
    }
}
