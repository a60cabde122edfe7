use anyhow::{anyhow, Context, Result};
use chrono::{NaiveTime, Timelike};
use log::info;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use waktu_solat::api::EsolatClient;
use waktu_solat::config::AppConfig;
use waktu_solat::db::SqliteStore;
use waktu_solat::models::prayer::minutes_since_midnight;
use waktu_solat::models::{Period, PreferencesPatch, PrayerResponse, Zone};
use waktu_solat::prayer_times::{
    parse_qibla_direction, PrayerCalculator, PrayerService, Source, ZoneSession,
};
use waktu_solat::preferences::{PreferencesContext, SaveOutcome};
use waktu_solat::utils::clock::{Clock, SystemClock};
use waktu_solat::utils::format::{format_gregorian_date, format_time};
use waktu_solat::utils::hijri::format_hijri_date;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

type Service<'a> = PrayerService<&'a SqliteStore, EsolatClient, SystemClock>;

fn service<'a>(store: &'a SqliteStore, config: &AppConfig) -> Result<Service<'a>> {
    let client = EsolatClient::new(&config.api.base_url, config.api.timeout())
        .context("Building HTTP client")?;
    Ok(PrayerService::new(store, client, config.clock()?))
}

fn resolve_zone(arg: Option<&str>, prefs: &PreferencesContext<&SqliteStore>) -> Result<&'static Zone> {
    match arg {
        Some(code) => Zone::find(code)
            .ok_or_else(|| anyhow!("Unknown zone '{}'. Run `waktu zones` to list them.", code)),
        None => Ok(prefs.preferences().selected_zone),
    }
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    store: &SqliteStore,
    config: &AppConfig,
    zone: Option<&str>,
    refresh: bool,
) -> Result<()> {
    let prefs = PreferencesContext::load(store);
    let zone = resolve_zone(zone, &prefs)?;
    let svc = service(store, config)?;

    let (monthly, source) = if refresh {
        (svc.refresh_prayer_times(zone.code)?, Source::Network)
    } else {
        svc.fetch_prayer_times_traced(zone.code)?
    };
    info!("{} table for {} from {:?}", monthly.period_type, zone.code, source);

    let today = svc
        .get_today_prayer_time(&monthly)
        .ok_or_else(|| anyhow!("e-Solat returned an empty table for {}", zone.code))?;
    let row = today.row();
    let now = svc.clock().now().time();
    let calc = PrayerCalculator::new(prefs.preferences());

    println!();
    println_colored!(GOLD, "  Waktu Solat: {} ({})", zone.name, zone.code);
    println_colored!(
        DIM,
        "  {}  ·  {}",
        format_gregorian_date(&row.date),
        format_hijri_date(&row.hijri)
    );
    if !today.is_exact() {
        println_colored!(AMBER, "  Today is not in the table; showing {}", row.date);
    }
    println!();

    for (kind, time) in calc.schedule(row) {
        let passed = minutes_since_midnight(time)
            .map(|m| m <= now.hour() * 60 + now.minute())
            .unwrap_or(false);
        let line = format!(
            "  {:<10}  {:<8}  {}",
            kind.display_name(),
            format_time(time),
            kind.arabic_name()
        );
        if passed {
            println_colored!(DIM, "{}", line);
        } else {
            println_colored!(BOLD, "{}", line);
        }
    }

    let status = calc.status_at(row, now)?;
    println!();
    println_colored!(GREEN, "  Sekarang:   {}", status.current);
    println_colored!(
        AMBER,
        "  Seterusnya: {} dalam {}",
        status.next,
        status.time_left()
    );
    println_colored!(
        DIM,
        "  {}",
        match source {
            Source::Cache => "Data Cached",
            Source::Network => "Data Fresh",
        }
    );
    println!();
    Ok(())
}

// ─── Week ────────────────────────────────────────────────────────────────────

pub fn handle_week(store: &SqliteStore, config: &AppConfig, zone: Option<&str>) -> Result<()> {
    let prefs = PreferencesContext::load(store);
    let zone = resolve_zone(zone, &prefs)?;
    let weekly = service(store, config)?.fetch_period(zone.code, Period::Week)?;

    println!();
    println_colored!(GOLD, "  Minggu ini: {} ({})", zone.name, zone.code);
    println!();
    println_colored!(
        DIM,
        "  {:<12} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "Tarikh",
        "Subuh",
        "Zohor",
        "Asar",
        "Maghrib",
        "Isyak"
    );
    for row in &weekly.prayer_time {
        println!(
            "  {:<12} {:>6} {:>6} {:>6} {:>6} {:>6}",
            row.date,
            format_time(&row.fajr),
            format_time(&row.dhuhr),
            format_time(&row.asr),
            format_time(&row.maghrib),
            format_time(&row.isha)
        );
    }
    println!();
    Ok(())
}

// ─── Zones ───────────────────────────────────────────────────────────────────

pub fn handle_zones(store: &SqliteStore, query: Option<&str>) -> Result<()> {
    let prefs = PreferencesContext::load(store);
    let selected = prefs.preferences().selected_zone.code;
    let zones = Zone::search(query.unwrap_or(""));

    if zones.is_empty() {
        println_colored!(AMBER, "  Tiada zon dijumpai");
        return Ok(());
    }

    let mut state = "";
    for zone in &zones {
        if zone.state != state {
            state = zone.state;
            println!();
            println_colored!(GOLD, "  {}", state);
        }
        if zone.code == selected {
            println_colored!(GREEN, "  ● {}  {}", zone.code, zone.name);
        } else {
            println!("    {}  {}", zone.code, zone.name);
        }
    }
    println!();
    println_colored!(DIM, "  {} zon dijumpai", zones.len());
    Ok(())
}

pub fn handle_zone(store: &SqliteStore, code: &str) -> Result<()> {
    let zone = Zone::find(code)
        .ok_or_else(|| anyhow!("Unknown zone '{}'. Run `waktu zones` to list them.", code))?;
    let mut prefs = PreferencesContext::load(store);
    let outcome = prefs.update(&PreferencesPatch {
        selected_zone: Some(zone),
        ..Default::default()
    });
    report_save(outcome);
    if outcome != SaveOutcome::Reverted {
        println_colored!(GREEN, "  ✓ Zone set to {}", zone);
    }
    Ok(())
}

// ─── Preferences ─────────────────────────────────────────────────────────────

pub fn handle_prefs(store: &SqliteStore, patch: PreferencesPatch) -> Result<()> {
    let mut prefs = PreferencesContext::load(store);
    if !patch.is_empty() {
        report_save(prefs.update(&patch));
    }

    let p = prefs.preferences();
    let on_off = |b: bool| if b { "on" } else { "off" };
    println!();
    println_colored!(GOLD, "  Tetapan");
    println!();
    println!("  Zone:                {}", p.selected_zone);
    println!("  Notifications:       {}", on_off(p.notifications));
    println!("  Early notification:  {}", on_off(p.early_notification));
    println!("  Show Imsak:          {}", on_off(p.show_imsak));
    println!("  Show Syuruk:         {}", on_off(p.show_syuruk));
    println!("  Show Dhuha:          {}", on_off(p.show_dhuha));
    let extras: Vec<_> = p.visible_extras().iter().map(|k| k.display_name()).collect();
    if !extras.is_empty() {
        println_colored!(DIM, "  Extra times shown:   {}", extras.join(", "));
    }
    println!();
    Ok(())
}

fn report_save(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Saved => {}
        SaveOutcome::Reverted => {
            println_colored!(AMBER, "  Could not save preferences; previous values restored")
        }
        SaveOutcome::Unsaved => {
            println_colored!(AMBER, "  Could not save preferences; changes apply to this run only")
        }
    }
}

// ─── Qibla ───────────────────────────────────────────────────────────────────

pub fn handle_qibla(store: &SqliteStore, config: &AppConfig, zone: Option<&str>) -> Result<()> {
    let prefs = PreferencesContext::load(store);
    let zone = resolve_zone(zone, &prefs)?;
    let monthly = service(store, config)?.fetch_prayer_times(zone.code)?;
    let qibla = parse_qibla_direction(&monthly.bearing);

    println!();
    println_colored!(GOLD, "  Arah Kiblat: {}", zone.name);
    println_colored!(BOLD, "  {}° {}", qibla.degrees, qibla.direction);
    println_colored!(DIM, "  {}", monthly.bearing);
    println!();
    Ok(())
}

// ─── Cache ───────────────────────────────────────────────────────────────────

pub fn handle_clear_cache(store: &SqliteStore, config: &AppConfig) -> Result<()> {
    let removed = service(store, config)?.clear_cache();
    println_colored!(GREEN, "  ✓ Removed {} cached month(s)", removed);
    Ok(())
}

// ─── Watch ───────────────────────────────────────────────────────────────────

pub fn handle_watch(store: &SqliteStore, config: &AppConfig, zone: Option<&str>) -> Result<()> {
    let prefs = PreferencesContext::load(store);
    let zone = resolve_zone(zone, &prefs)?;
    let svc = service(store, config)?;
    let calc = PrayerCalculator::new(prefs.preferences());
    let mut session = ZoneSession::new();
    let mut loaded_month = String::new();

    loop {
        let month = svc.current_month();
        if month != loaded_month || session.response().is_none() {
            let ticket = session.begin(zone.code);
            let monthly = svc.fetch_prayer_times(ticket.zone())?;
            session.complete(&ticket, monthly);
            loaded_month = month;
        }

        let now = svc.clock().now().time();
        if let Some(monthly) = session.response() {
            print_status_line(&svc, &calc, monthly, now)?;
        }

        // Wake on the next minute boundary
        thread::sleep(Duration::from_secs(60 - u64::from(now.second().min(59))));
    }
}

fn print_status_line(
    svc: &Service<'_>,
    calc: &PrayerCalculator,
    monthly: &PrayerResponse,
    now: NaiveTime,
) -> Result<()> {
    let row = svc
        .get_today_prayer_time(monthly)
        .ok_or_else(|| anyhow!("e-Solat returned an empty table"))?
        .row();
    let status = calc.status_at(row, now)?;
    print!(
        "\r\x1b[2K  {}  {}{}\x1b[0m → {}{}\x1b[0m dalam {}",
        now.format("%H:%M"),
        GREEN,
        status.current,
        AMBER,
        status.next,
        status.time_left()
    );
    io::stdout().flush()?;
    Ok(())
}
