//! Message texts sent by the wizard

use indoc::formatdoc;

use super::state::PaymentMethod;

pub const GREETING: &str =
    "¡Hola! Bienvenido al bot de Erexit 3D. ¿Ya has realizado el pago para entrar a nuestra comunidad? Sí/No";

pub const ASK_METHOD: &str = "Perfecto, ¿a través de qué medio has hecho el pago? Paypal/MercadoPago/Patreon";

pub const CHOOSE_METHOD_AGAIN: &str = "Elige uno de los métodos de pago: Paypal/MercadoPago/Patreon";

pub const PLEASE_PAY: &str =
    "Para continuar necesitas realizar el pago. Cuando lo hayas hecho, escribe /start para comenzar de nuevo.";

pub const YES_NO_NOT_UNDERSTOOD: &str =
    "No entendí tu respuesta. ¿Puedes decirme si ya realizaste el pago? Responde con \"Sí\" o \"No\".";

pub const MESSAGE_NOT_UNDERSTOOD: &str = "No pude entender el mensaje. ¿Podrías intentarlo de nuevo?";

pub const ASK_EMAIL: &str = "Excelente, ahora tu dirección de mail";

pub const INVALID_EMAIL: &str = "Esa dirección de mail no parece válida. ¿Podrías revisarla?";

pub const ASK_CONFIRMATION: &str = "Ingresa \"ok\" si ya realizaste el pago";

pub const CONFIRMATION_REMINDER: &str = "Cuando hayas realizado el pago, ingresa \"ok\".";

pub const WILL_VERIFY: &str = "Gracias, verificaremos tu pago.";

pub fn method_selected(method: PaymentMethod) -> String {
    format!(
        "Elegiste {}. Perfecto, ahora te voy a pedir tus datos. Ingresa tu nombre completo por favor",
        method.label()
    )
}

pub fn payment_link(link: &str) -> String {
    format!("Ahora por favor realiza el pago a través del siguiente enlace: {}", link)
}

pub fn group_invite(link: &str) -> String {
    format!(
        "¡Excelente! Ya estás suscrito. Ingresá al grupo de Telegram con este link: {}",
        link
    )
}

pub fn rate_limited(wait_secs: u64) -> String {
    format!("⏳ Demasiados mensajes seguidos. Espera {} s y vuelve a intentarlo.", wait_secs)
}

pub fn about(version: &str) -> String {
    formatdoc! {"
        Erexit 3D · bot de acceso a la comunidad (v{version})

        Te guía para realizar el pago, registra tu nombre y mail y te envía
        el enlace al grupo privado de Telegram.

        Escribe /start para comenzar."
    }
}

/// Payment and invite links handed out by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLinks {
    pub paypal: String,
    pub mercadopago: String,
    pub patreon: String,
    pub group_invite: String,
}

impl FlowLinks {
    pub fn payment_link(&self, method: PaymentMethod) -> &str {
        match method {
            PaymentMethod::Paypal => &self.paypal,
            PaymentMethod::MercadoPago => &self.mercadopago,
            PaymentMethod::Patreon => &self.patreon,
        }
    }

    /// Link text for the payment message; every link when no method was chosen.
    pub fn payment_links_for(&self, method: Option<PaymentMethod>) -> String {
        match method {
            Some(method) => self.payment_link(method).to_string(),
            None => PaymentMethod::ALL
                .iter()
                .map(|m| format!("\n{}: {}", m.label(), self.payment_link(*m)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> FlowLinks {
        FlowLinks {
            paypal: "https://pay.example/paypal".to_string(),
            mercadopago: "https://pay.example/mp".to_string(),
            patreon: "https://pay.example/patreon".to_string(),
            group_invite: "https://t.me/+group".to_string(),
        }
    }

    #[test]
    fn test_payment_link_per_method() {
        let links = links();
        assert_eq!(links.payment_link(PaymentMethod::MercadoPago), "https://pay.example/mp");
        assert_eq!(links.payment_links_for(Some(PaymentMethod::Patreon)), "https://pay.example/patreon");
    }

    #[test]
    fn test_payment_links_without_method_lists_all() {
        let text = links().payment_links_for(None);
        assert!(text.contains("Paypal: https://pay.example/paypal"));
        assert!(text.contains("MercadoPago: https://pay.example/mp"));
        assert!(text.contains("Patreon: https://pay.example/patreon"));
    }

    #[test]
    fn test_about_mentions_version_and_start() {
        let text = about("1.2.3");
        assert!(text.contains("v1.2.3"));
        assert!(text.contains("/start"));
    }
}
