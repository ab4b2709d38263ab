//! Audit trail listing. The trail itself is append-only.

use crate::domain::audit::AuditLog;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{Paginated, DEFAULT_ITEMS_PER_PAGE};
use crate::repository::{AuditLogListQuery, AuditLogReader};
use crate::services::{ensure_role, ServiceResult};
use crate::SERVICE_ADMIN_ROLE;

pub fn list_audit_logs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: AuditLogListQuery,
    page: usize,
) -> ServiceResult<Paginated<AuditLog>>
where
    R: AuditLogReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let query = query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, items) = repo.list_audit_logs(query)?;

    Ok(Paginated::new(items, page, total, DEFAULT_ITEMS_PER_PAGE))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::test_support::user_with_role;

    #[test]
    fn trail_is_admin_only() {
        let repo = MockRepository::new();
        let user = user_with_role("it", None, None);

        let result = list_audit_logs(&repo, &user, AuditLogListQuery::new(), 1);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn trail_is_paginated() {
        let mut repo = MockRepository::new();
        repo.expect_list_audit_logs()
            .withf(|query| {
                query
                    .pagination
                    .as_ref()
                    .is_some_and(|p| p.page == 2 && p.per_page == 50)
            })
            .returning(|_| Ok((60, vec![])));
        let user = user_with_role("admin", None, None);

        let page = list_audit_logs(&repo, &user, AuditLogListQuery::new(), 2).unwrap();

        assert_eq!(page.total, 60);
        assert_eq!(page.page, 2);
    }
}
