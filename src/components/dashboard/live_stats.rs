use leptos::prelude::*;
use std::time::Duration;

use crate::format::{bar_heights, growth_percentage, uptime, watch_time, weekday_label};
use crate::models::dashboard::{FollowerGrowthPoint, StreamStats};

#[component]
fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>, #[prop(optional)] highlight: bool) -> impl IntoView {
    let value_class = if highlight {
        "text-2xl font-bold text-seafoam-600 dark:text-mint-300"
    } else {
        "text-2xl font-bold"
    };
    view! {
        <div class="rounded-lg bg-gray-50 dark:bg-teal-900 p-4">
            <div class=value_class>{move || value.get()}</div>
            <div class="text-xs uppercase tracking-wide text-gray-500 dark:text-gray-400">{label}</div>
        </div>
    }
}

#[component]
pub fn LiveStats(
    #[prop(into)] stats: Signal<StreamStats>,
    #[prop(into)] growth: Signal<Vec<FollowerGrowthPoint>>,
) -> impl IntoView {
    let (elapsed, set_elapsed) = signal("00:00:00".to_string());

    // ticks once a second while the stream has a start time
    Effect::new(move |_| {
        let started = stats.with(|s| s.uptime);
        set_elapsed.set(uptime(started, chrono::Utc::now().timestamp_millis()));
        if started.is_none() {
            return;
        }
        if let Ok(handle) = set_interval_with_handle(
            move || set_elapsed.set(uptime(started, chrono::Utc::now().timestamp_millis())),
            Duration::from_secs(1),
        ) {
            on_cleanup(move || handle.clear());
        }
    });

    view! {
        <section class="bg-white dark:bg-teal-800 rounded-lg shadow p-4">
            <div class="flex items-center justify-between mb-3">
                <h2 class="text-lg font-semibold">"Live Statistics"</h2>
                <span class="inline-flex items-center gap-1 text-xs text-seafoam-600 dark:text-mint-300">
                    <span class="w-2 h-2 rounded-full bg-seafoam-500 animate-pulse"></span>
                    "Live"
                </span>
            </div>

            <div class="grid grid-cols-2 lg:grid-cols-3 gap-3">
                <StatCard label="Current Viewers" value=Signal::derive(move || stats.with(|s| s.current_viewers.to_string())) />
                <StatCard label="Peak Viewers" value=Signal::derive(move || stats.with(|s| s.peak_viewers.to_string())) />
                <StatCard label="Messages/Min" value=Signal::derive(move || stats.with(|s| s.chat_message_rate.to_string())) />
                <StatCard
                    label="New Followers"
                    value=Signal::derive(move || stats.with(|s| s.new_followers.to_string()))
                    highlight=true
                />
                <StatCard label="Total Watch Time" value=Signal::derive(move || stats.with(|s| watch_time(s.total_watch_time))) />
                <StatCard label="Stream Uptime" value=elapsed />
            </div>

            <Show when=move || growth.with(|g| !g.is_empty())>
                <GrowthChart growth />
            </Show>
        </section>
    }
}

#[component]
fn GrowthChart(growth: Signal<Vec<FollowerGrowthPoint>>) -> impl IntoView {
    let percentage = move || growth.with(|g| growth_percentage(g));

    view! {
        <div class="mt-6">
            <div class="flex items-center justify-between mb-2">
                <h3 class="font-medium">"Follower Growth (Last 7 Days)"</h3>
                <span class=move || {
                    if percentage() >= 0.0 {
                        "px-2 py-0.5 rounded text-xs bg-mint-100 text-seafoam-700"
                    } else {
                        "px-2 py-0.5 rounded text-xs bg-salmon-100 text-salmon-700"
                    }
                }>
                    {move || {
                        let p = percentage();
                        let arrow = if p >= 0.0 { "▲" } else { "▼" };
                        format!("{arrow} {:.1}%", p.abs())
                    }}
                </span>
            </div>
            <div class="flex items-end gap-2 h-40">
                {move || {
                    let points = growth.get();
                    let heights = bar_heights(&points);
                    points
                        .into_iter()
                        .zip(heights)
                        .map(|(point, height)| {
                            let title = format!("{}: {} followers", point.date, point.followers);
                            view! {
                                <div class="flex-1 flex flex-col items-center justify-end h-full">
                                    <div
                                        class="w-full rounded-t bg-seafoam-500 dark:bg-mint-500 text-[10px] text-center text-white"
                                        style=format!("height: {height:.0}%")
                                        title=title
                                    >
                                        {point.followers}
                                    </div>
                                    <div class="text-xs mt-1 text-gray-500">{weekday_label(&point.date)}</div>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
