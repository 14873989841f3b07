use super::common::*;
use crate::accounts::{User, UserId, UserRole};
use crate::listings::domain::ModerationStatus;
use crate::listings::moderation::{ModerationCapability, ModerationError};
use crate::listings::service::CatalogServiceError;
use crate::listings::store::PropertyRepository;
use crate::seed::sample_users;

#[test]
fn approving_updates_status_and_advances_timestamp() {
    let store = store();
    let controller = controller(&store);
    let capability = admin_capability();

    for property in snapshot(&store) {
        let before = property.updated_at;
        let updated = controller
            .set_moderation_status(&capability, &property.id, ModerationStatus::Approved, None)
            .expect("known listing");

        let stored = store
            .find_by_id(&property.id)
            .expect("store readable")
            .expect("listing present");
        assert_eq!(stored.moderation_status, ModerationStatus::Approved);
        assert!(stored.updated_at > before);
        assert_eq!(stored, updated);
    }
}

#[test]
fn rejected_listing_can_be_approved_with_notes() {
    let store = store();
    let controller = controller(&store);

    controller
        .set_moderation_status(
            &admin_capability(),
            &id("5"),
            ModerationStatus::Approved,
            Some("looks good".to_string()),
        )
        .expect("listing 5 exists");

    let stored = store
        .find_by_id(&id("5"))
        .expect("store readable")
        .expect("listing 5 present");
    assert_eq!(stored.moderation_status, ModerationStatus::Approved);
    assert_eq!(stored.moderation_notes.as_deref(), Some("looks good"));
}

#[test]
fn omitting_notes_clears_previous_notes() {
    let store = store();
    let controller = controller(&store);

    let updated = controller
        .set_moderation_status(&admin_capability(), &id("5"), ModerationStatus::Pending, None)
        .expect("listing 5 exists");

    assert_eq!(updated.moderation_status, ModerationStatus::Pending);
    assert!(updated.moderation_notes.is_none());
}

#[test]
fn every_status_transition_is_permitted() {
    let store = store();
    let controller = controller(&store);
    let capability = admin_capability();
    let statuses = [
        ModerationStatus::Pending,
        ModerationStatus::Approved,
        ModerationStatus::Rejected,
    ];

    for from in statuses {
        for to in statuses {
            controller
                .set_moderation_status(&capability, &id("3"), from, None)
                .expect("listing 3 exists");
            let updated = controller
                .set_moderation_status(&capability, &id("3"), to, None)
                .expect("listing 3 exists");
            assert_eq!(updated.moderation_status, to);
        }
    }
}

#[test]
fn toggling_verification_twice_restores_the_flag() {
    let store = store();
    let controller = controller(&store);
    let capability = admin_capability();

    for property in snapshot(&store) {
        let first = controller
            .toggle_verification(&capability, &property.id)
            .expect("known listing");
        assert_eq!(first.verified, !property.verified);

        let second = controller
            .toggle_verification(&capability, &property.id)
            .expect("known listing");
        assert_eq!(second.verified, property.verified);
        assert!(second.updated_at > first.updated_at);
    }
}

#[test]
fn verification_is_independent_of_status() {
    let store = store();
    let controller = controller(&store);

    let rejected = controller
        .toggle_verification(&admin_capability(), &id("5"))
        .expect("listing 5 exists");

    assert!(rejected.verified);
    assert_eq!(rejected.moderation_status, ModerationStatus::Rejected);
}

#[test]
fn unknown_ids_report_not_found_and_leave_store_untouched() {
    let store = store();
    let controller = controller(&store);
    let capability = admin_capability();
    let before = snapshot(&store);

    match controller.set_moderation_status(
        &capability,
        &id("404"),
        ModerationStatus::Approved,
        Some("n/a".to_string()),
    ) {
        Err(ModerationError::NotFound { id: missing }) => assert_eq!(missing, id("404")),
        other => panic!("expected not found, got {other:?}"),
    }

    match controller.toggle_verification(&capability, &id("404")) {
        Err(ModerationError::NotFound { .. }) => {}
        other => panic!("expected not found, got {other:?}"),
    }

    assert_eq!(snapshot(&store), before);
}

#[test]
fn stalled_clock_still_produces_strictly_later_timestamps() {
    let store = store();
    let controller = frozen_controller(&store);
    let capability = admin_capability();

    let before = store
        .find_by_id(&id("1"))
        .expect("store readable")
        .expect("listing 1 present")
        .updated_at;
    assert!(frozen_now() < before);

    let first = controller
        .toggle_verification(&capability, &id("1"))
        .expect("listing 1 exists");
    let second = controller
        .set_moderation_status(&capability, &id("1"), ModerationStatus::Rejected, None)
        .expect("listing 1 exists");

    assert!(first.updated_at > before);
    assert!(second.updated_at > first.updated_at);
}

#[test]
fn only_admins_are_granted_a_capability() {
    for user in sample_users() {
        let outcome = ModerationCapability::grant(&user);
        match user.role {
            UserRole::Admin => {
                assert_eq!(outcome.expect("admin granted").actor(), &user.id);
            }
            _ => assert!(matches!(
                outcome,
                Err(ModerationError::Forbidden { role, .. }) if role == user.role
            )),
        }
    }

    let regular = User {
        role: UserRole::User,
        id: UserId::new("99"),
        ..sample_users().remove(0)
    };
    assert!(ModerationCapability::grant(&regular).is_err());
}

#[test]
fn service_rejects_non_admin_and_unknown_actors() {
    let service = service();

    match service.moderate(&agent_id(), &id("3"), ModerationStatus::Approved, None) {
        Err(CatalogServiceError::Moderation(ModerationError::Forbidden { user_id, .. })) => {
            assert_eq!(user_id, agent_id());
        }
        other => panic!("expected forbidden, got {other:?}"),
    }

    match service.toggle_verification(&UserId::new("ghost"), &id("3")) {
        Err(CatalogServiceError::UnknownUser { id: missing }) => {
            assert_eq!(missing, UserId::new("ghost"));
        }
        other => panic!("expected unknown user, got {other:?}"),
    }

    let untouched = service
        .listings()
        .find_by_id(&id("3"))
        .expect("store readable")
        .expect("listing 3 present");
    assert_eq!(untouched.moderation_status, ModerationStatus::Pending);
    assert!(!untouched.verified);
}

#[test]
fn service_moderation_feeds_the_dashboard() {
    let service = service();

    let before = service.dashboard().expect("dashboard builds");
    assert_eq!(before.properties.pending, 2);
    assert_eq!(before.properties.approved, 3);
    assert_eq!(before.properties.rejected, 1);
    assert_eq!(before.properties.verified, 2);
    assert_eq!(before.users.agents, 2);

    service
        .moderate(&admin_id(), &id("6"), ModerationStatus::Approved, None)
        .expect("admin approves");
    service
        .toggle_verification(&admin_id(), &id("6"))
        .expect("admin verifies");

    let after = service.dashboard().expect("dashboard builds");
    assert_eq!(after.properties.total, 6);
    assert_eq!(after.properties.pending, 1);
    assert_eq!(after.properties.approved, 4);
    assert_eq!(after.properties.verified, 3);
}

#[test]
fn service_surfaces_repository_failures() {
    let service = crate::listings::service::CatalogService::new(
        std::sync::Arc::new(UnavailableRepository),
        crate::accounts::UserDirectory::new(sample_users()),
    );

    match service.moderate(&admin_id(), &id("1"), ModerationStatus::Approved, None) {
        Err(CatalogServiceError::Moderation(ModerationError::Repository(_))) => {}
        other => panic!("expected repository failure, got {other:?}"),
    }
    assert!(matches!(
        service.dashboard(),
        Err(CatalogServiceError::Repository(_))
    ));
}
