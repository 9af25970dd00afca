mod common;

use common::{RecordingNotifier, controller_at, off, on, topics};
use home_copilot::{
    ChargeMode, DeviceAction, DeviceController, EnergyMode, FixedClock, TariffWindow,
};
use std::sync::Arc;

#[tokio::test]
async fn turn_on_forwards_any_device_name() {
    let (ctrl, notifier) = controller_at(12, &["lamp"]);
    let action = ctrl.turn_on("garden_pump").await;
    assert_eq!(action, DeviceAction::on("garden_pump"));
    assert_eq!(
        notifier.calls(),
        vec![(
            "turn_on_device".to_string(),
            Some("garden_pump".to_string()),
            None
        )]
    );
}

#[tokio::test]
async fn turn_off_uses_off_event() {
    let (ctrl, notifier) = controller_at(12, &[]);
    ctrl.turn_off("lamp").await;
    assert_eq!(notifier.events(), vec![off("lamp")]);
}

#[tokio::test]
async fn eco_at_peak_turns_off_non_critical_present_devices() {
    let (ctrl, notifier) = controller_at(14, &["ac", "charger", "lamp", "tv"]);
    let actions = ctrl.optimize_home_energy(&EnergyMode::Eco).await;
    assert_eq!(actions, vec![DeviceAction::off("lamp"), DeviceAction::off("ac")]);
    assert_eq!(notifier.events(), vec![off("lamp"), off("ac")]);
}

#[tokio::test]
async fn eco_at_peak_skips_devices_missing_from_map() {
    let (ctrl, notifier) = controller_at(9, &["ac"]);
    ctrl.optimize_home_energy(&EnergyMode::Eco).await;
    assert_eq!(notifier.events(), vec![off("ac")]);

    let (ctrl, notifier) = controller_at(9, &[]);
    assert!(ctrl.optimize_home_energy(&EnergyMode::Eco).await.is_empty());
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn eco_in_low_tariff_keeps_devices() {
    for hour in [22, 23, 0, 6] {
        let (ctrl, notifier) = controller_at(hour, &["lamp", "ac"]);
        assert!(ctrl.optimize_home_energy(&EnergyMode::Eco).await.is_empty());
        assert!(notifier.calls().is_empty(), "hour {}", hour);
    }
}

#[tokio::test]
async fn comfort_and_unknown_modes_take_no_action() {
    let (ctrl, notifier) = controller_at(14, &["lamp", "ac"]);
    assert!(ctrl.optimize_home_energy(&EnergyMode::Comfort).await.is_empty());
    assert!(
        ctrl.optimize_home_energy(&EnergyMode::from_label("party"))
            .await
            .is_empty()
    );
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn force_on_ignores_tariff() {
    for hour in 0..24 {
        let (ctrl, notifier) = controller_at(hour, &[]);
        let actions = ctrl.optimize_ev_charging(&ChargeMode::ForceOn).await;
        assert_eq!(actions, vec![DeviceAction::on("charger")]);
        assert_eq!(notifier.events(), vec![on("charger")]);
    }
}

#[tokio::test]
async fn force_off_ignores_tariff() {
    let (ctrl, notifier) = controller_at(23, &[]);
    ctrl.optimize_ev_charging(&ChargeMode::ForceOff).await;
    assert_eq!(notifier.events(), vec![off("charger")]);
}

#[tokio::test]
async fn auto_follows_tariff_window() {
    let (ctrl, notifier) = controller_at(2, &[]);
    ctrl.optimize_ev_charging(&ChargeMode::Auto).await;
    assert_eq!(notifier.events(), vec![on("charger")]);

    let (ctrl, notifier) = controller_at(7, &[]);
    ctrl.optimize_ev_charging(&ChargeMode::Auto).await;
    assert_eq!(notifier.events(), vec![off("charger")]);
}

#[tokio::test]
async fn unrecognized_charge_mode_behaves_like_auto() {
    let (ctrl, notifier) = controller_at(22, &[]);
    ctrl.optimize_ev_charging(&ChargeMode::from_label("turbo")).await;
    assert_eq!(notifier.events(), vec![on("charger")]);

    let (ctrl, notifier) = controller_at(15, &[]);
    ctrl.optimize_ev_charging(&ChargeMode::from_label("turbo")).await;
    assert_eq!(notifier.events(), vec![off("charger")]);
}

#[tokio::test]
async fn full_day_window_always_charges() {
    let notifier = Arc::new(RecordingNotifier::default());
    let ctrl = DeviceController::new(
        topics(&[]),
        TariffWindow::new(5, 5),
        notifier.clone(),
        Arc::new(FixedClock(12)),
    );
    ctrl.optimize_ev_charging(&ChargeMode::Auto).await;
    assert_eq!(notifier.events(), vec![on("charger")]);
}

#[tokio::test]
async fn notifier_failure_is_absorbed() {
    let notifier = Arc::new(RecordingNotifier::failing());
    let ctrl = DeviceController::new(
        topics(&["lamp", "ac"]),
        TariffWindow::new(22, 7),
        notifier.clone(),
        Arc::new(FixedClock(12)),
    );
    let actions = ctrl.optimize_home_energy(&EnergyMode::Eco).await;
    assert_eq!(actions.len(), 2);
    assert_eq!(notifier.calls().len(), 2);
}

#[test]
fn tariff_now_reports_hour_and_window() {
    let (ctrl, _) = controller_at(21, &[]);
    assert_eq!(ctrl.tariff_now(), (21, false));
    let (ctrl, _) = controller_at(22, &[]);
    assert_eq!(ctrl.tariff_now(), (22, true));
}
