//! The scripted run: prompt, step templates and canned status texts.

pub(super) const PROMPT: &str = "Erstelle eine KI-Beratungsstrategie für ein mittelständisches Unternehmen basierend auf deren aktueller IT-Infrastruktur und Geschäftsprozessen";

pub(super) const STEPS: [&str; 5] = [
    "# Unternehmens-Analyse\n## Analysiere die aktuelle IT-Landschaft\n\n• 🔍 Scanne vorhandene Systeme und Prozesse …\n• … Haupttechnologien: SAP, Microsoft 365, Legacy-Systeme\n• … Digitalisierungsgrad: 60% der Prozesse bereits digitalisiert",
    "# KI-Potenzial-Assessment\n## Identifiziere KI-Anwendungsfälle\n\n• 🧠 Analysiere Geschäftsprozesse für KI-Optimierung …\n• … Potenzielle Bereiche: Kundenservice, Dokumentenverarbeitung, Qualitätskontrolle\n• … ROI-Schätzung: 25-40% Effizienzsteigerung in identifizierten Bereichen",
    "# Technologie-Roadmap\n## Entwickle Implementierungsplan\n\n• 📊 Erstelle schrittweise KI-Einführungsstrategie …\n• … Phase 1: Chatbot für Kundenservice (3 Monate)\n• … Phase 2: Dokumenten-KI für Rechnungsverarbeitung (6 Monate)\n• … Phase 3: Predictive Analytics für Lagerhaltung (12 Monate)",
    "# Schulungskonzept\n## Plane Mitarbeiter-Weiterbildung\n\n• 📚 Entwickle maßgeschneiderte KI-Schulungen …\n• … Grundlagen-Workshops für alle Mitarbeiter\n• … Spezialisierte Trainings für IT-Team und Führungskräfte\n• … Change Management für erfolgreiche KI-Adoption",
    "# Strategiedokument\n## Finalisiere KI-Roadmap\n\n• ✅ Erstelle umfassendes Strategiepapier …\n• … PDF generiert: KI_Strategie_Mittelstand_2024.pdf\n• … Budgetplanung und Zeitplan enthalten\n• … Ready for Management Presentation",
];

pub(super) const FINAL_SUMMARY: &str = "**Perfekt!** Ihre KI-Beratungsstrategie ist fertig.\n\n**Folgende Schritte wurden ausgeführt:**\n• 🔍 Unternehmens-Analyse (IT-Systeme & Prozesse)\n• 🧠 KI-Potenzial-Assessment (Anwendungsfälle identifiziert)\n• 📊 Technologie-Roadmap (3-Phasen-Plan erstellt)\n• 📚 Schulungskonzept (Mitarbeiter-Weiterbildung)\n• ✅ Strategiedokument (PDF generiert)\n\n👉 **Das Dokument ist optimiert für Management-Präsentationen.**\n\n**Möchten Sie, dass ich es zusätzlich in Ihrem Dokumentenmanagementsystem speichere?**";

pub(super) const UPLOADING: &str = "Speichere in Ihrem DMS...\n\nÜbertrage die KI-Strategie sicher in Ihr Dokumentenmanagementsystem und benachrichtige die Geschäftsführung.";

pub(super) const UPLOADED: &str = "✅ Erfolgreich gespeichert!\n\nDie KI-Beratungsstrategie wurde in Ihrem System hinterlegt und die Geschäftsführung wurde automatisch benachrichtigt. Die Strategie kann jetzt umgesetzt werden.";

pub(super) const FOOTER: &str = "AI-nleuchtend Agent Demo • KI-Beratung Edition • Powered by AI";

pub(super) const DOCUMENT_NAME: &str = "KI_Strategie_Mittelstand_2024.pdf";

pub(super) const ACCEPT_QUESTION: &str =
    "Möchten Sie die KI-Strategie nun in Ihrem System speichern?";
