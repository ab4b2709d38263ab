use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::prestataire::{
    KycUpdate, NewPrestataire, PaymentUpdate, Prestataire, UpdatePrestataire,
};
use crate::domain::status::WorkflowStatus;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, PrestataireListQuery, PrestataireReader, PrestataireWriter};
use crate::schema::prestataires;

fn filtered<'a>(query: &'a PrestataireListQuery) -> prestataires::BoxedQuery<'a, Sqlite> {
    let mut q = prestataires::table.into_boxed();

    if let Some(id) = query.campaign_id {
        q = q.filter(prestataires::campaign_id.eq(id));
    }
    if let Some(id) = query.form_id {
        q = q.filter(prestataires::form_id.eq(id));
    }
    if let Some(id) = query.province_id {
        q = q.filter(prestataires::province_id.eq(id));
    }
    if let Some(id) = query.zone_id {
        q = q.filter(prestataires::zone_id.eq(id));
    }
    if let Some(id) = query.aire_id {
        q = q.filter(prestataires::aire_id.eq(id));
    }
    if let Some(category) = &query.category {
        q = q.filter(prestataires::category.eq(category.as_str()));
    }
    if let Some(status) = query.status {
        q = q.filter(prestataires::status.eq(status.as_str()));
    }
    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        q = q.filter(
            prestataires::first_name
                .like(pattern.clone())
                .or(prestataires::last_name.like(pattern.clone()))
                .or(prestataires::prestataire_id.like(pattern)),
        );
    }

    q
}

impl PrestataireReader for DieselRepository {
    fn get_prestataire_by_id(&self, id: i32) -> RepositoryResult<Option<Prestataire>> {
        use crate::models::prestataire::Prestataire as DbPrestataire;

        let mut conn = self.conn()?;
        let prestataire = prestataires::table
            .find(id)
            .first::<DbPrestataire>(&mut conn)
            .optional()?;

        Ok(prestataire.map(Into::into))
    }

    fn get_prestataire_by_code(&self, code: &str) -> RepositoryResult<Option<Prestataire>> {
        use crate::models::prestataire::Prestataire as DbPrestataire;

        let mut conn = self.conn()?;
        let prestataire = prestataires::table
            .filter(prestataires::prestataire_id.eq(code))
            .first::<DbPrestataire>(&mut conn)
            .optional()?;

        Ok(prestataire.map(Into::into))
    }

    fn list_prestataires(
        &self,
        query: PrestataireListQuery,
    ) -> RepositoryResult<(usize, Vec<Prestataire>)> {
        use crate::models::prestataire::Prestataire as DbPrestataire;

        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items_query = filtered(&query).order(prestataires::id.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page.max(1) as i64;
            items_query = items_query
                .limit(per_page)
                .offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbPrestataire>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Prestataire>>();

        Ok((total as usize, items))
    }
}

impl PrestataireWriter for DieselRepository {
    fn create_prestataires(&self, new_prestataires: &[NewPrestataire]) -> RepositoryResult<usize> {
        use crate::models::prestataire::NewPrestataire as DbNewPrestataire;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewPrestataire> =
            new_prestataires.iter().map(|p| p.into()).collect();
        let affected = diesel::insert_into(prestataires::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_prestataire(
        &self,
        prestataire_id: i32,
        updates: &UpdatePrestataire,
    ) -> RepositoryResult<Prestataire> {
        use crate::models::prestataire::{
            Prestataire as DbPrestataire, UpdatePrestataire as DbUpdatePrestataire,
        };

        let mut conn = self.conn()?;
        let db_updates: DbUpdatePrestataire = updates.into();

        let updated = diesel::update(prestataires::table.find(prestataire_id))
            .set(&db_updates)
            .get_result::<DbPrestataire>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_workflow_status(
        &self,
        prestataire_id: i32,
        status: WorkflowStatus,
        comment: Option<&str>,
    ) -> RepositoryResult<Prestataire> {
        use crate::models::prestataire::Prestataire as DbPrestataire;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let target = prestataires::table.find(prestataire_id);

        let updated = match status {
            WorkflowStatus::ValideParIt => diesel::update(target)
                .set((
                    prestataires::status.eq(status.as_str()),
                    prestataires::validation_status.eq(Some("VALIDATED")),
                    prestataires::validated_at.eq(Some(now)),
                    prestataires::updated_at.eq(now),
                ))
                .get_result::<DbPrestataire>(&mut conn)?,
            WorkflowStatus::ApprouveParMcz => diesel::update(target)
                .set((
                    prestataires::status.eq(status.as_str()),
                    prestataires::approval_status.eq(Some("APPROVED")),
                    prestataires::approval_comment.eq(comment),
                    prestataires::approved_at.eq(Some(now)),
                    prestataires::updated_at.eq(now),
                ))
                .get_result::<DbPrestataire>(&mut conn)?,
            WorkflowStatus::RejeteParMcz => diesel::update(target)
                .set((
                    prestataires::status.eq(status.as_str()),
                    prestataires::approval_status.eq(Some("REJECTED")),
                    prestataires::approval_comment.eq(comment),
                    prestataires::approved_at.eq(Some(now)),
                    prestataires::updated_at.eq(now),
                ))
                .get_result::<DbPrestataire>(&mut conn)?,
            _ => diesel::update(target)
                .set((
                    prestataires::status.eq(status.as_str()),
                    prestataires::updated_at.eq(now),
                ))
                .get_result::<DbPrestataire>(&mut conn)?,
        };

        Ok(updated.into())
    }

    fn apply_payment_update(
        &self,
        prestataire_id: i32,
        update: &PaymentUpdate,
    ) -> RepositoryResult<Prestataire> {
        use crate::models::prestataire::Prestataire as DbPrestataire;

        let mut conn = self.conn()?;

        // Merge with the stored row so a report column left empty does not
        // wipe an earlier value.
        let current = prestataires::table
            .find(prestataire_id)
            .first::<DbPrestataire>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        let now = Utc::now().naive_utc();
        let updated = diesel::update(prestataires::table.find(prestataire_id))
            .set((
                prestataires::payment_status.eq(update.status.as_str()),
                prestataires::payment_date.eq(update.payment_date.or(current.payment_date)),
                prestataires::payment_amount.eq(update.amount.or(current.payment_amount)),
                prestataires::payment_currency
                    .eq(update.currency.clone().or(current.payment_currency)),
                prestataires::payment_reference
                    .eq(update.reference.clone().or(current.payment_reference)),
                prestataires::updated_at.eq(now),
            ))
            .get_result::<DbPrestataire>(&mut conn)?;

        Ok(updated.into())
    }

    fn apply_kyc_update(
        &self,
        prestataire_id: i32,
        update: &KycUpdate,
    ) -> RepositoryResult<Prestataire> {
        use crate::models::prestataire::Prestataire as DbPrestataire;

        let mut conn = self.conn()?;

        let current = prestataires::table
            .find(prestataire_id)
            .first::<DbPrestataire>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        let now = Utc::now().naive_utc();
        let updated = diesel::update(prestataires::table.find(prestataire_id))
            .set((
                prestataires::kyc_status.eq(update.status.as_str()),
                prestataires::account_number
                    .eq(update.account_number.clone().or(current.account_number)),
                prestataires::account_name
                    .eq(update.account_name.clone().or(current.account_name)),
                prestataires::account_operator
                    .eq(update.operator.clone().or(current.account_operator)),
                prestataires::kyc_verified_date
                    .eq(update.verified_date.or(current.kyc_verified_date)),
                prestataires::updated_at.eq(now),
            ))
            .get_result::<DbPrestataire>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_payment_amount(
        &self,
        prestataire_id: i32,
        amount: f64,
        currency: &str,
    ) -> RepositoryResult<Prestataire> {
        use crate::models::prestataire::Prestataire as DbPrestataire;

        let mut conn = self.conn()?;
        let updated = diesel::update(prestataires::table.find(prestataire_id))
            .set((
                prestataires::payment_amount.eq(Some(amount)),
                prestataires::payment_currency.eq(Some(currency)),
                prestataires::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbPrestataire>(&mut conn)?;

        Ok(updated.into())
    }
}
