//! Integration tests for the team roster deletion rule.

use assert_matches::assert_matches;
use footlights_core::error::CoreError;
use footlights_db::models::team_member::{CreateTeamMember, UpdateTeamMember};
use footlights_db::ordering::OrderingError;
use footlights_db::repositories::TeamMemberRepo;
use sqlx::PgPool;

fn new_member(name: &str) -> CreateTeamMember {
    CreateTeamMember {
        name: name.to_string(),
        role: "Stage manager".to_string(),
        bio: Some("Twenty seasons backstage.".to_string()),
        photo_media_id: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_active_member_cannot_be_deleted(pool: PgPool) {
    let member = TeamMemberRepo::create(&pool, &new_member("Inès")).await.unwrap();
    assert!(member.is_active);

    let err = TeamMemberRepo::delete(&pool, member.id).await.unwrap_err();
    assert_matches!(err, OrderingError::Invalid(CoreError::Conflict(_)));
    assert!(TeamMemberRepo::find_by_id(&pool, member.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivate_then_delete(pool: PgPool) {
    let first = TeamMemberRepo::create(&pool, &new_member("Inès")).await.unwrap();
    let second = TeamMemberRepo::create(&pool, &new_member("Marc")).await.unwrap();

    let deactivated = TeamMemberRepo::set_active(&pool, first.id, false)
        .await
        .unwrap()
        .unwrap();
    assert!(!deactivated.is_active);

    TeamMemberRepo::delete(&pool, first.id).await.unwrap();
    assert!(TeamMemberRepo::find_by_id(&pool, first.id)
        .await
        .unwrap()
        .is_none());

    let remaining = TeamMemberRepo::find_by_id(&pool, second.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(remaining.display_order, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_missing_member_is_not_found(pool: PgPool) {
    let err = TeamMemberRepo::delete(&pool, 424_242).await.unwrap_err();
    assert_matches!(
        err,
        OrderingError::Invalid(CoreError::NotFound { entity: "TeamMember", id: 424_242 })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_inactive_members_are_hidden_publicly(pool: PgPool) {
    let shown = TeamMemberRepo::create(&pool, &new_member("Inès")).await.unwrap();
    let hidden = TeamMemberRepo::create(&pool, &new_member("Marc")).await.unwrap();
    TeamMemberRepo::set_active(&pool, hidden.id, false).await.unwrap();

    let public = TeamMemberRepo::list_public(&pool).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, shown.id);
    assert!(public[0].photo_path.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let member = TeamMemberRepo::create(&pool, &new_member("Inès")).await.unwrap();
    let patch = UpdateTeamMember {
        role: Some("Artistic director".to_string()),
        ..Default::default()
    };
    let updated = TeamMemberRepo::update(&pool, member.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.role, "Artistic director");
    assert_eq!(updated.name, "Inès");
    assert_eq!(updated.bio, member.bio);
    assert_eq!(updated.display_order, member.display_order);
}
