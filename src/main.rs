//! Humanitária - aid management dashboard console
//!
//! Line-oriented front end over the session core: log in or register,
//! land in the administrative or donor shell, and make mock donations.

use humanitaria_session::{
    payment::{self, PaymentDetails, PaymentOutcome, PaymentRequest},
    shell::AdminSection,
    validation, AppConfig, AppContext, HubError, HubResult, RegisterData, View,
};
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> HubResult<()> {
    let config = AppConfig::from_env()?;

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| "humanitaria_session=info,humanitaria=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    print_banner();

    let ctx = AppContext::new(config).await?;

    // Restore before any command is reachable
    ctx.session_manager.restore_session().await;

    let mut console = Console::new(ctx);
    console.print_view().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = next_command(&mut lines, interrupted()).await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        if let Err(e) = console.handle(line).await {
            println!("! {}", e.user_message());
        }
    }

    Ok(())
}

/// Next input line, or `None` on end of input or when `interrupted` fires first
async fn next_command<R, F>(lines: &mut Lines<R>, interrupted: F) -> HubResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = interrupted => Ok(None),
        line = lines.next_line() => Ok(line?),
    }
}

/// Resolves on Ctrl-C
///
/// Once tokio installs its SIGINT handler the default exit is gone for the
/// rest of the process, so the prompt and a running payment both listen.
async fn interrupted() {
    let _ = tokio::signal::ctrl_c().await;
}

struct Console {
    ctx: AppContext,
    wants_register: bool,
    section: AdminSection,
}

impl Console {
    fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            wants_register: false,
            section: AdminSection::default(),
        }
    }

    async fn view(&self) -> View {
        let snapshot = self.ctx.session_manager.snapshot().await;
        View::for_session(&snapshot, self.wants_register)
    }

    async fn handle(&mut self, line: &str) -> HubResult<()> {
        let args: Vec<&str> = line.split_whitespace().collect();

        match args.as_slice() {
            ["help"] => print_help(),
            ["login", email, password] => self.login(email, password).await?,
            ["login", ..] => println!("usage: login <email> <password>"),
            ["register"] => {
                self.wants_register = true;
                self.print_view().await;
            }
            ["register", email, password, country, id_number, name @ ..] if !name.is_empty() => {
                let data = RegisterData {
                    full_name: name.join(" "),
                    email: email.to_string(),
                    password: password.to_string(),
                    country: country.to_string(),
                    id_number: id_number.to_string(),
                };
                self.register(data).await?;
            }
            ["register", ..] => {
                println!("usage: register <email> <password> <country> <id-number> <full name>")
            }
            ["back"] => {
                self.wants_register = false;
                self.print_view().await;
            }
            ["logout"] => {
                self.ctx.session_manager.logout().await;
                self.section = AdminSection::default();
                self.print_view().await;
            }
            ["whoami"] => self.print_view().await,
            ["section", id] => self.open_section(id).await?,
            ["methods", country] => print_methods(country),
            ["donate", country, method, amount, details @ ..] => {
                self.donate(country, method, amount, details).await?
            }
            _ => println!("unknown command, try `help`"),
        }

        Ok(())
    }

    async fn login(&mut self, email: &str, password: &str) -> HubResult<()> {
        validation::validate_login(email, password)?;

        self.ctx.session_manager.try_login(email, password).await?;
        self.wants_register = false;
        self.print_view().await;

        Ok(())
    }

    async fn register(&mut self, data: RegisterData) -> HubResult<()> {
        validation::validate_registration(&data)?;

        self.ctx.session_manager.try_register(&data).await?;
        self.wants_register = false;
        println!("Conta criada com sucesso!");
        self.print_view().await;

        Ok(())
    }

    async fn open_section(&mut self, id: &str) -> HubResult<()> {
        if self.view().await != View::AdminShell {
            return Err(HubError::Validation("Seção disponível apenas para administradores".to_string()));
        }

        self.section = AdminSection::from_id(id)
            .ok_or_else(|| HubError::Validation(format!("Seção desconhecida: {}", id)))?;
        println!("> {}", self.section.label());

        Ok(())
    }

    async fn donate(
        &mut self,
        country_code: &str,
        method_id: &str,
        amount: &str,
        details: &[&str],
    ) -> HubResult<()> {
        if self.view().await != View::DonorShell {
            return Err(HubError::Validation("Doações disponíveis apenas para doadores".to_string()));
        }

        let method = payment::method(method_id)
            .ok_or_else(|| HubError::Validation(format!("Método desconhecido: {}", method_id)))?;
        let details = match (method.method_type, details) {
            (payment::MethodType::Card, [number, expiry, cvv, holder @ ..]) => PaymentDetails::Card {
                number: number.to_string(),
                expiry: expiry.to_string(),
                cvv: cvv.to_string(),
                holder_name: holder.join(" "),
            },
            (payment::MethodType::Mobile, [phone, ..]) => PaymentDetails::Mobile {
                phone_number: phone.to_string(),
            },
            (payment::MethodType::Bank, _) => PaymentDetails::Bank,
            _ => {
                return Err(HubError::Validation(format!(
                    "Dados de pagamento incompletos para {}",
                    method.name
                )))
            }
        };

        let request = PaymentRequest {
            country_code: country_code.to_uppercase(),
            method_id: method_id.to_string(),
            amount_cents: payment::parse_amount(amount)?,
            details,
        };

        println!("Processando... (Ctrl-C cancela)");
        let outcome = self
            .ctx
            .payment_processor
            .initiate_with_cancel(&request, interrupted())
            .await?;

        match outcome {
            PaymentOutcome::Completed(receipt) => println!(
                "Doação de {} realizada com sucesso! ({})",
                receipt.formatted_amount, receipt.transaction_id
            ),
            PaymentOutcome::Cancelled => println!("Pagamento cancelado"),
        }

        Ok(())
    }

    async fn print_view(&self) {
        let snapshot = self.ctx.session_manager.snapshot().await;

        match View::for_session(&snapshot, self.wants_register) {
            View::Loading => println!("Carregando..."),
            View::Login => println!("[login] login <email> <senha>  |  register"),
            View::Register => println!(
                "[registro] register <email> <senha> <país> <documento> <nome completo>  |  back"
            ),
            View::AdminShell | View::DonorShell => {
                if let Some(account) = &snapshot.current_account {
                    println!(
                        "[{}] {} ({}) <{}>",
                        account.initials(),
                        account.display_name,
                        account.role,
                        account.email
                    );
                }
                if snapshot.account_kind() == Some(humanitaria_session::AccountKind::Donor) {
                    println!("Portal do doador: methods <país> | donate <país> <método> <valor> ...");
                } else {
                    let sections: Vec<&str> = AdminSection::ALL.iter().map(|s| s.id()).collect();
                    println!("Seção: {} | section <{}>", self.section.label(), sections.join("|"));
                }
            }
        }
    }
}

fn print_methods(country_code: &str) {
    let Some(country) = payment::country(country_code) else {
        println!("País desconhecido: {}", country_code);
        return;
    };

    println!("{} ({})", country.name, country.symbol);
    for method in payment::methods_for_country(country.code) {
        println!("  {:<12} {}", method.id, method.description);
    }

    let suggested: Vec<String> = payment::SUGGESTED_AMOUNTS
        .iter()
        .map(|amount| payment::format_amount(country, amount * 100))
        .collect();
    println!("  sugestões: {}", suggested.join(", "));
}

fn print_help() {
    println!(
        r#"comandos:
  login <email> <senha>
  register [<email> <senha> <país> <documento> <nome completo>]
  back | logout | whoami
  section <dashboard|donations|volunteers|projects|beneficiaries>
  methods <país>
  donate <país> <método> <valor> <cartão: número validade cvv titular | móvel: telefone>
  quit (ou Ctrl-C)"#
    );
}

fn print_banner() {
    println!(
        r#"
  _   _                             _ _            _
 | | | |_   _ _ __ ___   __ _ _ __ (_) |_ __ _ _ __(_) __ _
 | |_| | | | | '_ ` _ \ / _` | '_ \| | __/ _` | '__| |/ _` |
 |  _  | |_| | | | | | | (_| | | | | | || (_| | |  | | (_| |
 |_| |_|\__,_|_| |_| |_|\__,_|_| |_|_|\__\__,_|_|  |_|\__,_|

        Sistema de Gestão Humanitária v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
