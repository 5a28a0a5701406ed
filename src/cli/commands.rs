use anyhow::{Context, Result, bail};
use crossterm::terminal;

use crate::{
    app::AppContext,
    auth,
    cli::args::{Cli, Command, WishArgs},
    db::wish_repo,
    domain::wish::{
        GIFT_AMOUNTS, GiftCard, MAX_PHOTOS, OCCASIONS, Wish, WishForm, WishId, generate_code,
    },
    format, scheduler,
};

pub(crate) fn dispatch(app: &AppContext, cli: Cli) -> Result<()> {
    match cli.command {
        Command::Create { form } => create_wish(app, form),
        Command::Update { id, form } => update_wish(app, id, form),
        Command::Delete { id } => {
            wish_repo::delete(app.db(), &WishId::from(id))?;
            println!("Deleted.");
            Ok(())
        }
        Command::View { code } => view_wish(app, &code),
        Command::List { received, phone } => list_wishes(app, received, phone),
        Command::Occasions => {
            for (value, label) in OCCASIONS {
                println!("{:<12} {}", value, label);
            }
            Ok(())
        }
        Command::Register { phone, password } => register(app, &phone, &password),
        Command::Login { phone, password } => login(app, &phone, &password),
        Command::Logout => {
            auth::logout(app.db())?;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => whoami(app),
        Command::Passwd { phone, old, new } => passwd(app, phone, &old, &new),
        Command::Check => {
            let sent = scheduler::run_once(app.db())?;
            println!("{} wish(es) delivered.", sent);
            Ok(())
        }
        Command::Scheduler => scheduler::run(app.db()),
        Command::Version => {
            println!("wishlink {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Form-level checks live here, not in the repository: occasion catalog
/// membership, the photo cap, and gift-card completeness.
fn to_form(args: WishArgs) -> Result<WishForm> {
    if !OCCASIONS.iter().any(|(value, _)| *value == args.occasion) {
        bail!(
            "unknown occasion '{}' (run `wishlink occasions` for the list)",
            args.occasion
        );
    }
    if args.occasion == "other" && args.custom_occasion.trim().is_empty() {
        bail!("--custom-occasion is required with --occasion other");
    }
    if args.photos.len() > MAX_PHOTOS {
        bail!("a wish can carry at most {} photos", MAX_PHOTOS);
    }

    let gift_card = match args.gift_brand {
        Some(brand) => {
            let amount = args
                .gift_amount
                .context("--gift-amount is required with --gift-brand")?;
            if !GIFT_AMOUNTS.contains(&amount) {
                bail!(
                    "gift amount must be one of {:?}",
                    GIFT_AMOUNTS
                );
            }
            Some(GiftCard {
                brand,
                brand_logo: String::new(),
                amount,
                currency: args.gift_currency,
                code: args.gift_code.unwrap_or_else(generate_code),
                message: args.gift_message,
            })
        }
        None => None,
    };

    Ok(WishForm {
        sender_name: args.sender_name,
        sender_phone: args.sender_phone,
        recipient_name: args.recipient_name,
        recipient_phone: args.recipient_phone,
        occasion: args.occasion,
        custom_occasion: args.custom_occasion,
        message: args.message,
        photos: args.photos,
        occasion_date: args.date,
        gift_card,
    })
}

fn create_wish(app: &AppContext, args: WishArgs) -> Result<()> {
    let form = to_form(args)?;
    let wish = wish_repo::create(app.db(), &form)?;
    println!(
        "Wish created for {} on {}.",
        wish.recipient_name, wish.occasion_date
    );
    println!("Share code: {}", wish.code);
    Ok(())
}

fn update_wish(app: &AppContext, id: String, args: WishArgs) -> Result<()> {
    let form = to_form(args)?;
    match wish_repo::update(app.db(), &WishId::from(id), &form)? {
        Some(wish) => {
            println!("Wish {} updated.", wish.code);
            Ok(())
        }
        None => bail!("no wish with that id"),
    }
}

fn view_wish(app: &AppContext, code: &str) -> Result<()> {
    match wish_repo::find_by_code(app.db(), code)? {
        Some(wish) => {
            render_wish(&wish);
            Ok(())
        }
        None => bail!("no wish found for code {}", code.to_uppercase()),
    }
}

fn render_wish(wish: &Wish) {
    println!("Id:        {}", wish.id.as_str());
    println!("Code:      {}", wish.code);
    println!("Occasion:  {} ({})", wish.occasion, wish.occasion_date);
    println!("From:      {} <{}>", wish.sender_name, wish.sender_phone);
    println!("To:        {} <{}>", wish.recipient_name, wish.recipient_phone);
    println!("Message:   {}", wish.message);
    if !wish.photos.is_empty() {
        println!("Photos:    {}", wish.photos.len());
    }
    if let Some(card) = &wish.gift_card {
        println!(
            "Gift card: {} {} {} (code {})",
            card.brand, card.amount, card.currency, card.code
        );
    }
    println!("Created:   {}", format::format_display_time(&wish.created_at));
    println!("Notified:  {}", if wish.notified { "yes" } else { "not yet" });
}

fn list_wishes(app: &AppContext, received: bool, phone: Option<String>) -> Result<()> {
    let phone = match phone {
        Some(phone) => phone,
        None => match auth::current_user(app.db())? {
            Some(user) => user.phone,
            None => bail!("log in first or pass --phone"),
        },
    };
    let wishes = if received {
        wish_repo::list_by_recipient_phone(app.db(), &phone)?
    } else {
        wish_repo::list_by_sender_phone(app.db(), &phone)?
    };
    if wishes.is_empty() {
        println!("No wishes.");
        return Ok(());
    }
    let terminal_width = terminal::size()
        .map(|(width, _)| width as usize)
        .unwrap_or(80);
    for wish in wishes {
        let line = format::format_wish_line(
            &wish.code,
            &wish.occasion_date.to_string(),
            &wish.occasion,
            &wish.message,
            terminal_width,
        );
        println!("{}", line);
    }
    Ok(())
}

/// Password strength is a form policy; the directory accepts whatever the
/// form lets through.
fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < 6 {
        bail!("password must be at least 6 characters");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        bail!("password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        bail!("password must contain at least one number");
    }
    Ok(())
}

fn register(app: &AppContext, phone: &str, password: &str) -> Result<()> {
    validate_password(password)?;
    if auth::is_registered(app.db(), phone)? || !auth::register(app.db(), phone, password)? {
        bail!("{} is already registered; try `wishlink login`", phone);
    }
    println!("Registered {}. You are now logged in.", phone);
    Ok(())
}

fn login(app: &AppContext, phone: &str, password: &str) -> Result<()> {
    if auth::login(app.db(), phone, password)? {
        println!("Logged in as {}.", phone);
        Ok(())
    } else {
        bail!("invalid phone or password")
    }
}

fn whoami(app: &AppContext) -> Result<()> {
    match auth::current_user(app.db())? {
        Some(user) => println!(
            "{} (member since {})",
            user.phone,
            format::format_display_time(&user.created_at)
        ),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn passwd(app: &AppContext, phone: Option<String>, old: &str, new: &str) -> Result<()> {
    validate_password(new)?;
    let phone = match phone {
        Some(phone) => phone,
        None => match auth::current_user(app.db())? {
            Some(user) => user.phone,
            None => bail!("log in first or pass --phone"),
        },
    };
    if auth::change_password(app.db(), &phone, old, new)? {
        println!("Password changed.");
        Ok(())
    } else {
        bail!("invalid phone or password")
    }
}
