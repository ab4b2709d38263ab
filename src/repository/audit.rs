use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::audit::{AuditLog, NewAuditLog};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AuditLogListQuery, AuditLogReader, AuditLogWriter, DieselRepository};
use crate::schema::audit_logs;

fn filtered<'a>(query: &'a AuditLogListQuery) -> audit_logs::BoxedQuery<'a, Sqlite> {
    let mut q = audit_logs::table.into_boxed();

    if let Some(entity_type) = &query.entity_type {
        q = q.filter(audit_logs::entity_type.eq(entity_type.as_str()));
    }
    if let Some(entity_id) = &query.entity_id {
        q = q.filter(audit_logs::entity_id.eq(entity_id.as_str()));
    }
    if let Some(action) = &query.action {
        q = q.filter(audit_logs::action.eq(action.to_string()));
    }

    q
}

impl AuditLogReader for DieselRepository {
    fn list_audit_logs(
        &self,
        query: AuditLogListQuery,
    ) -> RepositoryResult<(usize, Vec<AuditLog>)> {
        use crate::models::audit::AuditLog as DbAuditLog;

        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items_query = filtered(&query).order(audit_logs::id.desc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page.max(1) as i64;
            items_query = items_query
                .limit(per_page)
                .offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbAuditLog>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<AuditLog>>();

        Ok((total as usize, items))
    }
}

impl AuditLogWriter for DieselRepository {
    fn append_audit_log(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog> {
        use crate::models::audit::{AuditLog as DbAuditLog, NewAuditLog as DbNewAuditLog};

        let mut conn = self.conn()?;
        let insertable: DbNewAuditLog = entry.into();
        let created = diesel::insert_into(audit_logs::table)
            .values(&insertable)
            .get_result::<DbAuditLog>(&mut conn)?;

        Ok(created.into())
    }
}
