use rewind_core::Locale;

pub fn build_summary_prompt(context: &str, locale: Locale) -> String {
    match locale {
        Locale::Es => format!(
            "Eres un asistente que resume sesiones de trabajo con un modelo para programar.\n\
             A partir del siguiente historial de eventos (mensajes del usuario, uso de herramientas, \
             respuestas del asistente), escribe un resumen en ESPAÑOL de lo que se hizo en la sesión.\n\
             Requisitos:\n\
             - Un sólo párrafo de aproximadamente 5–6 líneas.\n\
             - Tono técnico pero claro.\n\
             - No repitas literalmente todos los mensajes, sintetiza las ideas.\n\n\
             === HISTORIAL ===\n\
             {}\n\
             === FIN DEL HISTORIAL ===\n\n\
             Ahora produce el resumen:\n",
            context
        ),
        Locale::En => format!(
            "You are an assistant summarizing coding-assistant sessions.\n\
             From the following history of events (user messages, tool calls, assistant replies), \
             write a summary in ENGLISH of what was done in the session.\n\
             Requirements:\n\
             - A single paragraph of about 5–6 lines.\n\
             - Technical but clear tone.\n\
             - Do not repeat every message verbatim; synthesize the key ideas.\n\n\
             === HISTORY ===\n\
             {}\n\
             === END OF HISTORY ===\n\n\
             Now produce the summary:\n",
            context
        ),
    }
}
