mod common;

#[test]
fn test_creates_a_usable_db_file() {
    let test_db = common::TestDb::new("test_db_connection.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}
