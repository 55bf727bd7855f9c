// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::Result;
use chrono::{Datelike, Local};
use tracing::{info, warn};

use crate::{
    events::AppEvent,
    model::{self, AyahEdition},
    tasks::TaskContext,
};

pub(super) fn load_surahs(ctx: &TaskContext) -> Result<()> {
    let surahs = match ctx.store.cached_surahs() {
        Some(surahs) => surahs,
        None => {
            let surahs = ctx.api.fetch_surahs()?;
            ctx.store.store_surahs(&surahs);
            surahs
        }
    };

    info!(count = surahs.len(), "Chapter list loaded");
    ctx.event_tx.send(AppEvent::SurahsLoaded(surahs))?;

    Ok(())
}

pub(super) fn load_surah(ctx: &TaskContext, number: u32) -> Result<()> {
    let arabic = edition(ctx, number, &ctx.config.arabic_edition)?;

    let translation = edition(ctx, number, &ctx.config.translation_edition).unwrap_or_else(|e| {
        warn!(surah = number, error = %e, "Translation unavailable");
        Vec::new()
    });

    let ayahs = model::merge_editions(number, arabic, translation)
        .into_iter()
        .map(|mut ayah| {
            ayah.audio = ctx
                .store
                .resolve_audio(number, ayah.number_in_surah, ayah.audio.take());
            ayah
        })
        .collect();

    ctx.event_tx.send(AppEvent::SurahLoaded {
        surah: number,
        ayahs,
    })?;

    Ok(())
}

fn edition(ctx: &TaskContext, number: u32, edition: &str) -> Result<Vec<AyahEdition>> {
    if let Some(verses) = ctx.store.cached_edition(number, edition) {
        return Ok(verses);
    }

    let verses = if edition == ctx.config.arabic_edition {
        ctx.api.fetch_surah_arabic(number)?
    } else {
        ctx.api.fetch_surah_translation(number)?
    };
    ctx.store.store_edition(number, edition, &verses);

    Ok(verses)
}

pub(super) fn load_daily_ayah(ctx: &TaskContext) -> Result<()> {
    let daily = ctx.api.fetch_daily_ayah(Local::now().ordinal())?;
    ctx.event_tx.send(AppEvent::DailyAyahLoaded(daily))?;

    Ok(())
}

pub(super) fn measure_storage(ctx: &TaskContext) -> Result<()> {
    ctx.event_tx
        .send(AppEvent::StorageMeasured(ctx.store.storage_size()))?;

    Ok(())
}
