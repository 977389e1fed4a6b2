use schoolhub_core::{
    AppConfig, AppContext, CredentialDirectory, EntityId, NewStudent, DEMO_ADMIN_EMAIL,
    DEMO_ADMIN_PASSWORD,
};

#[test]
fn dashboard_summary_requires_login() {
    let mut app = AppContext::new(CredentialDirectory::demo(), true);
    assert!(app.dashboard_summary().is_none());

    assert!(app.session_mut().login(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD));
    let summary = app.dashboard_summary().unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.active, 4);

    app.session_mut().logout();
    assert!(app.dashboard_summary().is_none());
}

#[test]
fn contexts_do_not_share_session_or_records() {
    let mut first = AppContext::new(CredentialDirectory::demo(), false);
    let second = AppContext::new(CredentialDirectory::demo(), false);

    assert!(first.session_mut().login(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD));
    first.students_mut().add_student(NewStudent::default());

    assert!(!second.session().is_authenticated());
    assert!(second.students().students().is_empty());
    assert_eq!(first.students().students().len(), 1);
}

#[test]
fn from_default_config_seeds_demo_roster() {
    let app = AppContext::from_config(&AppConfig::default()).unwrap();
    assert_eq!(app.students().students().len(), 5);
    assert_eq!(
        app.students().get_student(EntityId::new(1)).unwrap().name,
        "Rahul Sharma"
    );
    app.shutdown();
}
