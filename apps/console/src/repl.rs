//! Command tokenizing and dispatch for the console loop.

use std::str::FromStr;

use rigforge_core::{CustomerDraft, Money, ProductCategory, ProductDraft};
use rigforge_ledger::{BuildRequest, ComponentSelection, LedgerState, Severity};
use rigforge_namegen::{suggest_build_name, ChatNameSource, ComponentSummary, NamegenConfig};

const HELP: &str = "\
Commands:
  product add <sku> <name> <category> <price> <qty> [serialized]
  product set <id> <sku> <name> <category> <price> <qty> [serialized]
  product list
  product rm <id>
  serial add <product-id> <serial-number>
  serial list <product-id>
  serial edit <serial-id> <new-number>
  serial rm <serial-id>
  customer add <name> [email] [phone]
  customer edit <id> <name> [email] [phone]
  customer list
  customer rm <id>
  build <name> <serial-number> [customer=<id>] <component>...
        component is <product-id> or <product-id>=<serial-id>
  builds
  name <product-id>...   suggest an AI build name
  help | quit

Ids may be abbreviated to any unique prefix. Quote multi-word values.";

/// Runs one console command against the ledger.
pub async fn dispatch(
    state: &LedgerState,
    source: &ChatNameSource,
    config: &NamegenConfig,
    line: &str,
) {
    let tokens = tokenize(line);
    let parts: Vec<&str> = tokens.iter().map(String::as_str).collect();

    match parts.as_slice() {
        ["help"] => println!("{HELP}"),

        ["product", "add", sku, name, category, price, qty, rest @ ..] => {
            cmd_product_add(state, None, sku, name, category, price, qty, rest);
        }
        ["product", "set", id, sku, name, category, price, qty, rest @ ..] => {
            cmd_product_add(state, Some(id), sku, name, category, price, qty, rest);
        }
        ["product", "list"] => cmd_product_list(state),
        ["product", "rm", id] => {
            if let Some(id) = resolve_product(state, id) {
                let _ = state.with_ledger_mut(|l| l.delete_product(&id));
            }
        }

        ["serial", "add", product_id, serial_number] => {
            if let Some(id) = resolve_product(state, product_id) {
                let _ = state.with_ledger_mut(|l| l.add_serial_number(&id, serial_number));
            }
        }
        ["serial", "list", product_id] => cmd_serial_list(state, product_id),
        ["serial", "edit", serial_id, new_number] => {
            if let Some(id) = resolve_serial(state, serial_id) {
                let _ = state.with_ledger_mut(|l| l.update_serial_number(&id, new_number));
            }
        }
        ["serial", "rm", serial_id] => {
            if let Some(id) = resolve_serial(state, serial_id) {
                let _ = state.with_ledger_mut(|l| l.delete_serial_number(&id));
            }
        }

        ["customer", "add", name, rest @ ..] => {
            let draft = customer_draft(name, rest);
            let _ = state.with_ledger_mut(|l| l.add_customer(draft));
        }
        ["customer", "edit", id, name, rest @ ..] => {
            if let Some(id) = resolve_customer(state, id) {
                let draft = customer_draft(name, rest);
                let _ = state.with_ledger_mut(|l| l.update_customer(&id, draft));
            }
        }
        ["customer", "list"] => cmd_customer_list(state),
        ["customer", "rm", id] => {
            if let Some(id) = resolve_customer(state, id) {
                let _ = state.with_ledger_mut(|l| l.delete_customer(&id));
            }
        }

        ["build", name, serial_number, rest @ ..] => {
            cmd_build(state, name, serial_number, rest);
        }
        ["builds"] => cmd_builds(state),

        ["name", product_ids @ ..] if !product_ids.is_empty() => {
            cmd_name(state, source, config, product_ids).await;
        }

        _ => println!("Unrecognized command. Type 'help'."),
    }
}

/// Prints and clears all pending notifications.
pub fn drain_notifications(state: &LedgerState) {
    let pending: Vec<_> = state.with_ledger(|l| l.notifications().to_vec());
    state.with_ledger_mut(|l| {
        for notification in &pending {
            l.dismiss_notification(&notification.id);
        }
    });
    for notification in pending {
        let glyph = match notification.severity {
            Severity::Success => "+",
            Severity::Error => "!",
            Severity::Info => "i",
        };
        println!("[{glyph}] {}", notification.message);
    }
}

// =============================================================================
// Commands
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn cmd_product_add(
    state: &LedgerState,
    id: Option<&str>,
    sku: &str,
    name: &str,
    category: &str,
    price: &str,
    qty: &str,
    rest: &[&str],
) {
    let category = match ProductCategory::from_str(category) {
        Ok(c) => c,
        Err(err) => return println!("{err}"),
    };
    let price_cents = match parse_price(price) {
        Ok(c) => c,
        Err(err) => return println!("{err}"),
    };
    let quantity: i64 = match qty.parse() {
        Ok(q) => q,
        Err(_) => return println!("Invalid quantity: {qty}"),
    };
    let is_serialized = matches!(rest, ["serialized"]);

    let draft = ProductDraft {
        name: name.to_string(),
        category,
        price_cents,
        quantity,
        is_serialized,
        sku: sku.to_string(),
    };

    match id {
        None => {
            let _ = state.with_ledger_mut(|l| l.add_product(draft));
        }
        Some(prefix) => {
            if let Some(id) = resolve_product(state, prefix) {
                let _ = state.with_ledger_mut(|l| l.update_product(&id, draft));
            }
        }
    }
}

fn cmd_product_list(state: &LedgerState) {
    state.with_ledger(|l| {
        if l.products().is_empty() {
            return println!("No products.");
        }
        for p in l.products() {
            let kind = if p.is_serialized { "serialized" } else { "bulk" };
            println!(
                "{}  {:<12} {:<10} {:>10}  qty {:>3}  {}  {}",
                short(&p.id),
                p.sku,
                p.category,
                p.price().to_string(),
                p.quantity,
                kind,
                p.name
            );
        }
    });
}

fn cmd_serial_list(state: &LedgerState, product_prefix: &str) {
    let Some(product_id) = resolve_product(state, product_prefix) else {
        return;
    };
    state.with_ledger(|l| {
        let mut any = false;
        for s in l.serials_for_product(&product_id) {
            any = true;
            println!("{}  {:<20} {}", short(&s.id), s.serial_number, s.status);
        }
        if !any {
            println!("No serial numbers.");
        }
    });
}

fn cmd_customer_list(state: &LedgerState) {
    state.with_ledger(|l| {
        if l.customers().is_empty() {
            return println!("No customers.");
        }
        for c in l.customers() {
            println!(
                "{}  {:<24} {}",
                short(&c.id),
                c.name,
                c.email.as_deref().unwrap_or("-")
            );
        }
    });
}

fn cmd_build(state: &LedgerState, name: &str, serial_number: &str, rest: &[&str]) {
    let mut customer_id = None;
    let mut components = Vec::new();

    for arg in rest {
        if let Some(prefix) = arg.strip_prefix("customer=") {
            match resolve_customer(state, prefix) {
                Some(id) => customer_id = Some(id),
                None => return,
            }
        } else {
            let (product_part, serial_part) = match arg.split_once('=') {
                Some((p, s)) => (p, Some(s)),
                None => (*arg, None),
            };
            let Some(product_id) = resolve_product(state, product_part) else {
                return;
            };
            let serial_id = match serial_part {
                Some(prefix) => match resolve_serial(state, prefix) {
                    Some(id) => Some(id),
                    None => return,
                },
                None => None,
            };
            components.push(ComponentSelection {
                product_id,
                serial_id,
            });
        }
    }

    let request = BuildRequest {
        name: name.to_string(),
        serial_number: serial_number.to_string(),
        components,
        customer_id,
    };
    if let Ok(receipt) = state.with_ledger_mut(|l| l.build_pc(request)) {
        println!(
            "{}  {}  {}  {}",
            short(&receipt.build.id),
            receipt.build.name,
            receipt.pc_product.sku,
            receipt.total()
        );
    }
}

fn cmd_builds(state: &LedgerState) {
    state.with_ledger(|l| {
        if l.builds().is_empty() {
            return println!("No builds.");
        }
        for b in l.builds() {
            let price = l
                .product(&b.pc_product_id)
                .map(|p| p.price().to_string())
                .unwrap_or_else(|| "-".to_string());
            let owner = b
                .customer_id
                .as_deref()
                .and_then(|id| l.customer(id))
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "unassigned".to_string());
            println!(
                "{}  {:<24} {:<16} {:>10}  {} parts  {}",
                short(&b.id),
                b.name,
                b.serial_number,
                price,
                b.component_ids.len(),
                owner
            );
        }
    });
}

async fn cmd_name(
    state: &LedgerState,
    source: &ChatNameSource,
    config: &NamegenConfig,
    product_prefixes: &[&str],
) {
    let mut summaries = Vec::new();
    for prefix in product_prefixes {
        let Some(id) = resolve_product(state, prefix) else {
            return;
        };
        let summary = state.with_ledger(|l| {
            l.product(&id).map(|p| ComponentSummary {
                name: p.name.clone(),
                category: p.category.label().to_string(),
            })
        });
        if let Some(summary) = summary {
            summaries.push(summary);
        }
    }

    // Network call happens outside the ledger lock
    let name = suggest_build_name(source, config, &summaries).await;
    println!("Suggested name: {name}");
}

// =============================================================================
// Helpers
// =============================================================================

/// Splits a command line on whitespace, honoring double-quoted segments.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Parses a dollar amount like `399.99`, `399.9`, or `399` into cents.
fn parse_price(input: &str) -> Result<i64, String> {
    let bad = || format!("Invalid price: {input}");
    if input.starts_with('-') {
        return Err(bad());
    }
    let (major, minor) = match input.split_once('.') {
        None => (input, "0"),
        Some((major, minor)) if minor.len() <= 2 && !minor.is_empty() => (major, minor),
        Some(_) => return Err(bad()),
    };
    let major: i64 = major.parse().map_err(|_| bad())?;
    let mut minor: i64 = minor.parse().map_err(|_| bad())?;
    if input.split_once('.').is_some_and(|(_, m)| m.len() == 1) {
        minor *= 10;
    }
    if major < 0 || minor < 0 {
        return Err(bad());
    }
    Ok(Money::from_major_minor(major, minor).cents())
}

fn customer_draft(name: &str, rest: &[&str]) -> CustomerDraft {
    CustomerDraft {
        name: name.to_string(),
        email: rest.first().map(|s| s.to_string()),
        phone: rest.get(1).map(|s| s.to_string()),
        address: rest.get(2).map(|s| s.to_string()),
    }
}

fn short(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn resolve_product(state: &LedgerState, prefix: &str) -> Option<String> {
    resolve(prefix, state.with_ledger(|l| {
        l.products().iter().map(|p| p.id.clone()).collect()
    }))
}

fn resolve_serial(state: &LedgerState, prefix: &str) -> Option<String> {
    resolve(prefix, state.with_ledger(|l| {
        l.serialized_items().iter().map(|s| s.id.clone()).collect()
    }))
}

fn resolve_customer(state: &LedgerState, prefix: &str) -> Option<String> {
    resolve(prefix, state.with_ledger(|l| {
        l.customers().iter().map(|c| c.id.clone()).collect()
    }))
}

/// Expands an id prefix against a candidate list; must match exactly one.
fn resolve(prefix: &str, candidates: Vec<String>) -> Option<String> {
    let matches: Vec<String> = candidates
        .into_iter()
        .filter(|id| id.starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [only] => Some(only.clone()),
        [] => {
            println!("No id matches '{prefix}'.");
            None
        }
        _ => {
            println!("Ambiguous id prefix '{prefix}'.");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
