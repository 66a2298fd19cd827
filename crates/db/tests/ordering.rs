//! Integration tests for ordered-collection persistence.
//!
//! Covers:
//! - Reorder then re-fetch matches the request exactly, for every permutation
//! - Rejected reorders leave every row untouched
//! - Gallery ordering is scoped per show
//! - Appends and deletes keep positions dense

use assert_matches::assert_matches;
use footlights_core::error::CoreError;
use footlights_core::ordering::is_dense;
use footlights_db::models::gallery_photo::CreateGalleryPhoto;
use footlights_db::models::hero_slide::CreateHeroSlide;
use footlights_db::models::media::CreateMedia;
use footlights_db::models::partner::CreatePartner;
use footlights_db::models::show::CreateShow;
use footlights_db::models::team_member::CreateTeamMember;
use footlights_db::ordering::{self, OrderingError, GALLERY_PHOTOS, HERO_SLIDES, TEAM_MEMBERS};
use footlights_db::repositories::{
    GalleryPhotoRepo, HeroSlideRepo, MediaRepo, PartnerRepo, ShowRepo, TeamMemberRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_slide(title: &str) -> CreateHeroSlide {
    CreateHeroSlide {
        title: title.to_string(),
        subtitle: None,
        image_media_id: None,
        cta_label: None,
        cta_url: None,
        is_active: None,
    }
}

fn new_member(name: &str) -> CreateTeamMember {
    CreateTeamMember {
        name: name.to_string(),
        role: "Actor".to_string(),
        bio: None,
        photo_media_id: None,
    }
}

fn new_show(title: &str) -> CreateShow {
    CreateShow {
        title: title.to_string(),
        slug: None,
        subtitle: None,
        description: None,
        status: None,
        premiere_date: None,
        closing_date: None,
        duration_minutes: None,
        poster_media_id: None,
    }
}

fn new_media(path: &str) -> CreateMedia {
    CreateMedia {
        folder_id: None,
        file_name: "photo.jpg".to_string(),
        storage_path: path.to_string(),
        mime_type: "image/jpeg".to_string(),
        size_bytes: 1024,
        width: Some(800),
        height: Some(600),
        alt_text: None,
        tags: vec![],
        uploaded_by: None,
    }
}

async fn slide_positions(pool: &PgPool) -> Vec<(i64, i32)> {
    ordering::current_order(pool, &HERO_SLIDES, None)
        .await
        .unwrap()
        .into_iter()
        .map(|p| (p.id, p.display_order))
        .collect()
}

fn permutations(items: &[i64]) -> Vec<Vec<i64>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_appends_are_dense_from_zero(pool: PgPool) {
    let a = HeroSlideRepo::create(&pool, &new_slide("A")).await.unwrap();
    let b = HeroSlideRepo::create(&pool, &new_slide("B")).await.unwrap();
    let c = HeroSlideRepo::create(&pool, &new_slide("C")).await.unwrap();

    assert_eq!(a.display_order, 0);
    assert_eq!(b.display_order, 1);
    assert_eq!(c.display_order, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rotate_three_slides(pool: PgPool) {
    let a = HeroSlideRepo::create(&pool, &new_slide("A")).await.unwrap();
    let b = HeroSlideRepo::create(&pool, &new_slide("B")).await.unwrap();
    let c = HeroSlideRepo::create(&pool, &new_slide("C")).await.unwrap();

    HeroSlideRepo::reorder(&pool, &[c.id, a.id, b.id])
        .await
        .unwrap();

    let a = HeroSlideRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    let b = HeroSlideRepo::find_by_id(&pool, b.id).await.unwrap().unwrap();
    let c = HeroSlideRepo::find_by_id(&pool, c.id).await.unwrap().unwrap();
    assert_eq!(a.display_order, 1);
    assert_eq!(b.display_order, 2);
    assert_eq!(c.display_order, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_every_permutation_round_trips(pool: PgPool) {
    let mut ids = Vec::new();
    for name in ["Ana", "Bruno", "Chloé", "Dario"] {
        ids.push(TeamMemberRepo::create(&pool, &new_member(name)).await.unwrap().id);
    }

    for perm in permutations(&ids) {
        let plan = TeamMemberRepo::reorder(&pool, &perm).await.unwrap();
        assert_eq!(plan.len(), perm.len());

        let stored: Vec<i64> = TeamMemberRepo::list(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(stored, perm);

        let positions: Vec<i32> = ordering::current_order(&pool, &TEAM_MEMBERS, None)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.display_order)
            .collect();
        assert!(is_dense(&positions), "positions not dense: {positions:?}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mismatched_ids_leave_rows_untouched(pool: PgPool) {
    let a = HeroSlideRepo::create(&pool, &new_slide("A")).await.unwrap();
    let b = HeroSlideRepo::create(&pool, &new_slide("B")).await.unwrap();
    let c = HeroSlideRepo::create(&pool, &new_slide("C")).await.unwrap();
    let before = slide_positions(&pool).await;

    let attempts: Vec<Vec<i64>> = vec![
        vec![],
        vec![c.id, a.id],
        vec![c.id, a.id, a.id],
        vec![c.id, a.id, b.id, 999_999],
        vec![c.id, a.id, 999_999],
    ];
    for attempt in attempts {
        let err = HeroSlideRepo::reorder(&pool, &attempt).await.unwrap_err();
        assert_matches!(
            err,
            OrderingError::Invalid(CoreError::Validation(_) | CoreError::InvalidFields(_))
        );
        assert_eq!(slide_positions(&pool).await, before);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gallery_reorder_is_scoped_per_show(pool: PgPool) {
    let show_a = ShowRepo::create(&pool, &new_show("Ondine"), "ondine").await.unwrap();
    let show_b = ShowRepo::create(&pool, &new_show("Phèdre"), "phedre").await.unwrap();

    let mut photos_a = Vec::new();
    let mut photos_b = Vec::new();
    for i in 0..3 {
        let media = MediaRepo::create(&pool, &new_media(&format!("2025/01/a{i}.jpg")))
            .await
            .unwrap();
        let input = CreateGalleryPhoto { media_id: media.id, caption: None };
        photos_a.push(GalleryPhotoRepo::create(&pool, show_a.id, &input).await.unwrap());
        photos_b.push(GalleryPhotoRepo::create(&pool, show_b.id, &input).await.unwrap());
    }
    // Each show starts its own sequence at zero.
    assert_eq!(photos_b[0].display_order, 0);

    let reversed: Vec<i64> = photos_a.iter().rev().map(|p| p.id).collect();
    GalleryPhotoRepo::reorder(&pool, show_a.id, &reversed).await.unwrap();

    let order_a: Vec<i64> = GalleryPhotoRepo::list_for_show(&pool, show_a.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(order_a, reversed);

    let order_b: Vec<i64> = GalleryPhotoRepo::list_for_show(&pool, show_b.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(order_b, photos_b.iter().map(|p| p.id).collect::<Vec<_>>());

    // Ids from another show's gallery are foreign to this scope.
    let foreign: Vec<i64> = photos_b.iter().map(|p| p.id).collect();
    let err = GalleryPhotoRepo::reorder(&pool, show_a.id, &foreign)
        .await
        .unwrap_err();
    assert_matches!(err, OrderingError::Invalid(CoreError::InvalidFields(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_recompacts_positions(pool: PgPool) {
    let mut ids = Vec::new();
    for name in ["Ville", "Région", "Mécène", "Radio"] {
        let input = CreatePartner {
            name: name.to_string(),
            category: None,
            logo_media_id: None,
            website_url: None,
            is_active: None,
        };
        ids.push(PartnerRepo::create(&pool, &input).await.unwrap().id);
    }

    assert!(PartnerRepo::delete(&pool, ids[1]).await.unwrap());
    assert!(!PartnerRepo::delete(&pool, ids[1]).await.unwrap());

    let partners = PartnerRepo::list(&pool).await.unwrap();
    let listed: Vec<(i64, i32)> = partners.iter().map(|p| (p.id, p.display_order)).collect();
    assert_eq!(listed, vec![(ids[0], 0), (ids[2], 1), (ids[3], 2)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_media_recompacts_galleries(pool: PgPool) {
    let show = ShowRepo::create(&pool, &new_show("Tartuffe"), "tartuffe").await.unwrap();
    let mut media_ids = Vec::new();
    for i in 0..3 {
        let media = MediaRepo::create(&pool, &new_media(&format!("2025/02/t{i}.jpg")))
            .await
            .unwrap();
        let input = CreateGalleryPhoto { media_id: media.id, caption: None };
        GalleryPhotoRepo::create(&pool, show.id, &input).await.unwrap();
        media_ids.push(media.id);
    }

    let removed = MediaRepo::delete(&pool, media_ids[0]).await.unwrap();
    assert!(removed.is_some());

    let positions: Vec<i32> = ordering::current_order(&pool, &GALLERY_PHOTOS, Some(show.id))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.display_order)
        .collect();
    assert_eq!(positions, vec![0, 1]);
}
