//! Terminal front end for the catalog store: list screens and product detail.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::warn;

use crate::catalog::{format_price, CatalogGroup, Product};
use crate::store::selectors::{detail_view, last_error, products_for};
use crate::store::{CatalogState, CatalogStore, DetailView};

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Dump the whole state as JSON instead of the text screens.
    pub json: bool,
}

fn write_json(out: &mut impl Write, state: &CatalogState) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, state).context("serializing catalog state")?;
    writeln!(out)?;
    Ok(())
}

pub fn render_list(out: &mut impl Write, state: &CatalogState, group: CatalogGroup) -> Result<()> {
    let products = products_for(state, group);
    writeln!(out, "== {group} ({} products)", products.len())?;
    for p in products {
        write!(out, "#{:<4} {}  {}", p.id, p.title, format_price(p.price))?;
        if p.has_discount() {
            write!(out, "  {}", p.discount_label())?;
        }
        writeln!(out)?;
    }
    if let Some(err) = last_error(state) {
        writeln!(out, "Erro: {err}")?;
    }
    Ok(())
}

fn render_product(out: &mut impl Write, p: &Product) -> Result<()> {
    writeln!(out, "{}", p.title)?;
    if let Some(brand) = p.brand_label() {
        writeln!(out, "Marca: {brand}")?;
    }
    writeln!(out, "Categoria: {}", p.category)?;
    if p.has_discount() {
        writeln!(
            out,
            "Preço: {} (de {}, {})",
            format_price(p.discounted_price()),
            format_price(p.price),
            p.discount_label()
        )?;
    } else {
        writeln!(out, "Preço: {}", format_price(p.price))?;
    }
    writeln!(out, "Avaliação: {:.1}/5", p.rating)?;
    writeln!(out, "Estoque: {}", p.stock)?;
    if !p.description.is_empty() {
        writeln!(out, "\n{}", p.description)?;
    }
    for img in &p.images {
        writeln!(out, "  {img}")?;
    }
    Ok(())
}

pub fn render_detail(out: &mut impl Write, state: &CatalogState) -> Result<()> {
    match detail_view(state) {
        DetailView::Ready(p) => render_product(out, p),
        view => {
            writeln!(out, "{}", view.message().unwrap_or("Carregando produto..."))?;
            Ok(())
        }
    }
}

/// Home screen flow: both groups are requested together, then `show` is listed.
pub async fn run_browse(
    store: &CatalogStore,
    show: CatalogGroup,
    opts: OutputOptions,
    out: &mut impl Write,
) -> Result<()> {
    let handles: Vec<_> = CatalogGroup::ALL
        .into_iter()
        .map(|g| (g, store.spawn_load_group(g)))
        .collect();

    let mut shown_failed = None;
    for (group, handle) in handles {
        match handle.await.context("catalog load task panicked")? {
            Ok(_) => {}
            Err(err) if group == show => shown_failed = Some(err),
            Err(err) => warn!(%group, error = %err, "background group failed"),
        }
    }

    let state = store.snapshot();
    if opts.json {
        write_json(out, &state)?;
    } else {
        render_list(out, &state, show)?;
    }
    match shown_failed {
        Some(err) => Err(err).with_context(|| format!("loading {show} catalog")),
        None => Ok(()),
    }
}

pub async fn run_group(
    store: &CatalogStore,
    group: CatalogGroup,
    opts: OutputOptions,
    out: &mut impl Write,
) -> Result<()> {
    let res = store.load_group(group).await;
    let state = store.snapshot();
    if opts.json {
        write_json(out, &state)?;
    } else {
        render_list(out, &state, group)?;
    }
    res.map(|_| ()).with_context(|| format!("loading {group} catalog"))
}

pub async fn run_product(
    store: &CatalogStore,
    id: u64,
    opts: OutputOptions,
    out: &mut impl Write,
) -> Result<()> {
    let res = store.load_product(id).await;
    let state = store.snapshot();
    if opts.json {
        write_json(out, &state)?;
    } else {
        render_detail(out, &state)?;
    }
    res.map(|_| ()).with_context(|| format!("loading product {id}"))
}
