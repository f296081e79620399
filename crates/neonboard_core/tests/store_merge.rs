use neonboard_core::config::DashboardConfig;
use neonboard_core::model::metrics::{GuestbookStatsPatch, SiteStatsPatch};
use neonboard_core::model::notification::{NewNotification, NotificationKind};
use neonboard_core::model::settings::{FluidSettingsPatch, ThemeId};
use neonboard_core::{
    DashboardStore, SettingsError, SettingsPolicy, StoreChange, UiSettings, UiSettingsPatch,
};
use std::cell::RefCell;
use std::rc::Rc;

fn strict_store() -> DashboardStore {
    DashboardStore::with_config(&DashboardConfig {
        settings_policy: SettingsPolicy::Strict,
        ..DashboardConfig::default()
    })
}

#[test]
fn fresh_store_matches_documented_defaults() {
    let store = DashboardStore::new();
    assert!(store.is_dark_mode());
    assert!(store.sidebar_open());
    assert!(!store.is_animating());
    assert_eq!(store.ui_settings(), &UiSettings::default());
    assert_eq!(store.stats().visitors, 12_450);
    assert_eq!(store.stats().orders, 892);
    assert_eq!(store.guestbook_stats().total_posts, 5);
    assert_eq!(store.notification_count(), 0);
}

#[test]
fn settings_patch_only_overwrites_given_fields() {
    let mut store = DashboardStore::new();
    let before = store.ui_settings().clone();

    store
        .update_ui_settings(&UiSettingsPatch {
            theme: Some(ThemeId::Nature),
            ..UiSettingsPatch::default()
        })
        .expect("permissive update");

    let after = store.ui_settings();
    assert_eq!(after.theme, ThemeId::Nature);
    assert_eq!(after.animation_speed, before.animation_speed);
    assert_eq!(after.sidebar_width, before.sidebar_width);
    assert_eq!(after.fluid_settings, before.fluid_settings);
}

#[test]
fn nested_fluid_patch_keeps_sibling_coefficients() {
    let mut store = DashboardStore::new();
    store
        .update_ui_settings(&UiSettingsPatch {
            fluid_settings: Some(FluidSettingsPatch {
                curl: Some(7.5),
                ..FluidSettingsPatch::default()
            }),
            ..UiSettingsPatch::default()
        })
        .expect("permissive update");
    store
        .update_fluid_settings(&FluidSettingsPatch {
            splat_force: Some(9_000.0),
            ..FluidSettingsPatch::default()
        })
        .expect("permissive update");

    let fluid = &store.ui_settings().fluid_settings;
    assert_eq!(fluid.curl, 7.5);
    assert_eq!(fluid.splat_force, 9_000.0);
    assert_eq!(fluid.sim_resolution, 128);
}

#[test]
fn empty_patches_change_nothing_and_stay_silent() {
    let mut store = strict_store();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    store.subscribe(move |change, _| sink.borrow_mut().push(*change));
    let before = store.snapshot();

    let nested_only = UiSettingsPatch {
        fluid_settings: Some(FluidSettingsPatch::default()),
        ..UiSettingsPatch::default()
    };
    assert!(!nested_only.is_empty());
    assert!(UiSettingsPatch::default().is_empty());
    store
        .update_ui_settings(&UiSettingsPatch::default())
        .expect("empty patch");
    store
        .update_fluid_settings(&FluidSettingsPatch::default())
        .expect("empty fluid patch");

    assert_eq!(store.snapshot(), before);
    assert!(changes.borrow().is_empty());
}

#[test]
fn stats_patch_updates_visitors_and_keeps_orders() {
    let mut store = DashboardStore::new();
    store.update_stats(&SiteStatsPatch {
        visitors: Some(12_460),
        ..SiteStatsPatch::default()
    });
    assert_eq!(store.stats().visitors, 12_460);
    assert_eq!(store.stats().orders, 892);
    assert_eq!(store.stats().revenue, 45_678);
}

#[test]
fn guestbook_stats_are_not_clamped() {
    let mut store = DashboardStore::new();
    store.update_guestbook_stats(&GuestbookStatsPatch {
        total_views: Some(-3),
        ..GuestbookStatsPatch::default()
    });
    assert_eq!(store.guestbook_stats().total_views, -3);
    assert_eq!(store.guestbook_stats().total_posts, 5);
}

#[test]
fn permissive_policy_stores_out_of_range_sidebar_width() {
    let mut store = DashboardStore::new();
    store
        .update_ui_settings(&UiSettingsPatch {
            sidebar_width: Some(500),
            ..UiSettingsPatch::default()
        })
        .expect("permissive policy accepts any width");
    assert_eq!(store.ui_settings().sidebar_width, 500);
}

#[test]
fn strict_policy_rejects_and_leaves_state_untouched() {
    let mut store = strict_store();
    let before = store.snapshot();

    let err = store
        .update_ui_settings(&UiSettingsPatch {
            theme: Some(ThemeId::Sunset),
            sidebar_width: Some(500),
            ..UiSettingsPatch::default()
        })
        .expect_err("strict policy rejects width 500");

    assert!(matches!(
        err,
        SettingsError::OutOfRange {
            field: "sidebar_width",
            ..
        }
    ));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn strict_policy_rejects_negative_fluid_force() {
    let mut store = strict_store();
    let err = store
        .update_fluid_settings(&FluidSettingsPatch {
            splat_force: Some(-1.0),
            ..FluidSettingsPatch::default()
        })
        .expect_err("negative force is out of range");
    assert!(err.to_string().contains("fluid.splat_force"));
    assert_eq!(store.ui_settings().fluid_settings.splat_force, 6_000.0);
}

#[test]
fn toggles_are_involutions() {
    let mut store = DashboardStore::new();
    let before = store.snapshot();

    assert!(!store.toggle_theme());
    assert!(store.toggle_theme());
    assert!(!store.toggle_sidebar());
    assert!(store.toggle_sidebar());

    assert_eq!(store.snapshot(), before);
}

#[test]
fn add_then_remove_restores_the_queue() {
    let mut store = DashboardStore::new();
    store.add_notification(NewNotification::new("first", NotificationKind::Info), 10);
    let before: Vec<_> = store.notifications().cloned().collect();

    let id = store.add_notification(
        NewNotification::new("Saved", NotificationKind::Success),
        20,
    );
    let added = store
        .notifications()
        .last()
        .cloned()
        .expect("notification was appended");
    assert_eq!(added.id, id);
    assert_eq!(added.message, "Saved");
    assert_eq!(added.created_at_ms, 20);

    assert!(store.remove_notification(id));
    let after: Vec<_> = store.notifications().cloned().collect();
    assert_eq!(after, before);
}

#[test]
fn removing_unknown_id_changes_nothing() {
    let mut store = DashboardStore::new();
    let id = store.add_notification(NewNotification::new("x", NotificationKind::Warning), 1);
    assert!(store.remove_notification(id));

    let before = store.snapshot();
    assert!(!store.remove_notification(id));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn notification_ids_are_unique() {
    let mut store = DashboardStore::new();
    let a = store.add_notification(NewNotification::new("a", NotificationKind::Info), 1);
    let b = store.add_notification(NewNotification::new("a", NotificationKind::Info), 1);
    assert_ne!(a, b);
}

#[test]
fn eviction_is_reported_to_listeners() {
    let mut store = DashboardStore::with_config(&DashboardConfig {
        notification_capacity: 1,
        ..DashboardConfig::default()
    });
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    store.subscribe(move |change, state| {
        sink.borrow_mut().push((*change, state.notifications.len()));
    });

    let first = store.add_notification(NewNotification::new("a", NotificationKind::Info), 1);
    let second = store.add_notification(NewNotification::new("b", NotificationKind::Info), 2);

    assert_eq!(
        changes.borrow().as_slice(),
        &[
            (StoreChange::NotificationAdded(first), 1),
            (StoreChange::NotificationEvicted(first), 0),
            (StoreChange::NotificationAdded(second), 1),
        ]
    );
}

#[test]
fn snapshot_serializes_with_type_tag_for_notifications() {
    let mut store = DashboardStore::new();
    store.add_notification(NewNotification::new("ok", NotificationKind::Success), 5);
    let json = serde_json::to_value(store.state()).expect("state serializes");

    assert_eq!(json["is_dark_mode"], true);
    assert_eq!(json["notifications"][0]["type"], "success");
    assert_eq!(json["ui_settings"]["fluid_settings"]["SPLAT_FORCE"], 6000.0);
}
