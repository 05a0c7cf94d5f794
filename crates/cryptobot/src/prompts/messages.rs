//! Reply templates, Spanish first with English variants

use super::TemplateName;
use cryptobot_prompt::{JinjaTemplate, Result};

/// Greeting plus the list of available commands
pub fn start() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        TemplateName::Start.as_str(),
        "
        Hola{% if user %} {{ user | escape_md }}{% endif %},
        Este bot está en desarrollo pero es usable.

        🔮 Los comandos disponibles son los siguientes:
        {% for command in commands %}
        /{{ command | escape_md }}
        {% endfor %}
        ",
        "
        Hi{% if user %} {{ user | escape_md }}{% endif %},
        This bot is under development but usable.

        🔮 These are the available commands:
        {% for command in commands %}
        /{{ command | escape_md }}
        {% endfor %}
        ",
    )
}

/// Version and author details
pub fn about_info() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        TemplateName::AboutInfo.as_str(),
        "
        *{{ info.name }}* v{{ info.version }}

        👤 *Autor:*
        • {{ info.author.name | escape_md }}
        {% if info.author.email %}
        • {{ info.author.email | escape_md }}
        {% endif %}
        {% if info.author.url %}
        • {{ info.author.url | escape_md }}
        {% endif %}
        {% if info.author.telegram %}
        • @{{ info.author.telegram | escape_md }}
        {% endif %}
        ",
        "
        *{{ info.name }}* v{{ info.version }}

        👤 *Author:*
        • {{ info.author.name | escape_md }}
        {% if info.author.email %}
        • {{ info.author.email | escape_md }}
        {% endif %}
        {% if info.author.url %}
        • {{ info.author.url | escape_md }}
        {% endif %}
        {% if info.author.telegram %}
        • @{{ info.author.telegram | escape_md }}
        {% endif %}
        ",
    )
}

/// Donation addresses, one block each
pub fn about_donations() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        TemplateName::AboutDonations.as_str(),
        "
        🙏 *Ayúdame a mantener esto con alguna donación:*

        {% for item in donations %}
        - {{ item.name }}:
          `{{ item.address }}`
        {% endfor %}
        ",
        "
        🙏 *Help me keep this running with a donation:*

        {% for item in donations %}
        - {{ item.name }}:
          `{{ item.address }}`
        {% endfor %}
        ",
    )
}

/// One block per exchange row, then the quote time
pub fn market_status() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        TemplateName::MarketStatus.as_str(),
        "
        {% for exchange in exchanges %}
        🏦 *{{ exchange.name }}* ({{ exchange.pair }}):
        📤 ASK: `{{ exchange.ask }}`
        📥 BID: `{{ exchange.bid }}`
        📊 Volumen: `{{ exchange.volume }}`

        {% endfor %}
        _{{ date }}_
        ",
        "
        {% for exchange in exchanges %}
        🏦 *{{ exchange.name }}* ({{ exchange.pair }}):
        📤 ASK: `{{ exchange.ask }}`
        📥 BID: `{{ exchange.bid }}`
        📊 Volume: `{{ exchange.volume }}`

        {% endfor %}
        _{{ date }}_
        ",
    )
}
