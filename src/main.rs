use chime::config::ChimeConfig;
use chime::core::draft::NotificationDraft;
use chime::core::view::NotificationView;
use chime::sync;
use chime::sync::client::NotifyClient;

const USAGE: &str = "\
Usage: chime [--server URL] [--debug] <command>

Commands:
  list              Show all notifications and their statuses
  status <id>       Show one notification's status
  create [options]  Schedule a notification
  cancel <id>       Cancel a pending notification

Create options:
  --channel <email|stdout|telegram>  Delivery channel (default from config)
  --message <text>                   Notification body
  --send-at <ISO-8601>               Send time (default: now, local offset)
  --subject <text>                   Email subject (email channel only)
  --to <a@x,b@y>                     Comma-separated recipients (email only)
";

#[tokio::main]
async fn main() {
    systemd_journal_logger::JournalLog::new()
        .unwrap()
        .with_syslog_identifier("chime".to_string())
        .install()
        .unwrap();
    log::set_max_level(log::LevelFilter::Info);

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(pos) = args.iter().position(|a| a == "--debug") {
        args.remove(pos);
        log::set_max_level(log::LevelFilter::Debug);
    }

    let config = ChimeConfig::load();
    let mut server_url = config.server_url.clone();
    if let Some(pos) = args.iter().position(|a| a == "--server") {
        if pos + 1 >= args.len() {
            eprintln!("--server requires a URL");
            std::process::exit(2);
        }
        server_url = args.remove(pos + 1);
        args.remove(pos);
    }

    let client = match NotifyClient::new(&server_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match args.first().map(String::as_str) {
        Some("list") => run_list(&client).await,
        Some("status") => match args.get(1) {
            Some(id) => run_status(&client, id).await,
            None => {
                eprintln!("status requires a notification id");
                std::process::exit(2);
            }
        },
        Some("create") => run_create(&client, &config, &args[1..]).await,
        Some("cancel") => match args.get(1) {
            Some(id) => run_cancel(&client, id).await,
            None => {
                eprintln!("cancel requires a notification id");
                std::process::exit(2);
            }
        },
        _ => {
            eprint!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

async fn run_list(client: &NotifyClient) {
    let mut view = NotificationView::new();
    sync::reconcile(client, &mut view).await;

    if !view.is_visible() {
        println!("No notifications.");
        return;
    }

    println!("{:<38} {:<24} {}", "ID", "STATUS", "ACTION");
    for row in view.rows() {
        let action = if row.action_disabled { "-" } else { "cancelable" };
        println!("{:<38} {:<24} {}", row.id, row.status, action);
    }
}

async fn run_status(client: &NotifyClient, id: &str) {
    match sync::query_status(client, id).await {
        Ok(status) => println!("{}", status),
        Err(e) => println!("{}", e),
    }
}

async fn run_create(client: &NotifyClient, config: &ChimeConfig, args: &[String]) {
    let mut channel = config.default_channel.clone();
    let mut message = String::new();
    let mut send_at = None;
    let mut subject = String::new();
    let mut recipients = String::new();

    let mut i = 0;
    while i < args.len() {
        match (args[i].as_str(), args.get(i + 1)) {
            ("--channel", Some(v)) => channel = v.clone(),
            ("--message", Some(v)) => message = v.clone(),
            ("--send-at", Some(v)) => send_at = Some(v.clone()),
            ("--subject", Some(v)) => subject = v.clone(),
            ("--to", Some(v)) => recipients = v.clone(),
            (flag, _) => {
                eprintln!("Unknown or incomplete option: {}", flag);
                std::process::exit(2);
            }
        }
        i += 2;
    }

    let mut draft = NotificationDraft::new(&channel, message);
    if let Some(send_at) = send_at {
        draft.send_at = send_at;
    }
    draft.subject = subject;
    draft.set_recipients(&recipients);

    let mut view = NotificationView::new();
    match sync::create(client, &mut view, &draft).await {
        Ok(sync::CreateOutcome::Created { id, status }) => {
            println!("Created with ID: {} ({})", id, status);
        }
        Ok(sync::CreateOutcome::Rejected(message)) => println!("{}", message),
        Err(e) => println!("{}", e),
    }
}

async fn run_cancel(client: &NotifyClient, id: &str) {
    let mut view = NotificationView::new();
    match sync::cancel(client, &mut view, id).await {
        Ok(sync::CancelOutcome::Canceled) => println!("Canceled {}", id),
        Ok(sync::CancelOutcome::Rejected(message)) => println!("{}", message),
        Err(e) => println!("Network error: {}", e),
    }
}
