//! Grist table and column identifiers for the audit document

pub mod questions {
    pub const TABLE: &str = "AuditsQuestions";
    pub const CATEGORY: &str = "Categorie";
    pub const QUESTION: &str = "Question";
    pub const IMPORTANCE: &str = "Importance";
    pub const TOOLTIP: &str = "Tooltip";
    pub const STATUS: &str = "Statut";
    /// Only validated questions are part of the questionnaire.
    pub const STATUS_VALIDATED: &str = "Validée";
}

pub mod audits {
    pub const TABLE: &str = "AuditsAudits";
    pub const HASH: &str = "Hash";
    pub const PRODUCT: &str = "Produit";
    pub const COMMITTEE_DATE: &str = "Date_comite_d_investissment";
    pub const CLOSED: &str = "Cloture";
    pub const CLOSED_AT: &str = "Cloture_le";
}

pub mod responses {
    pub const TABLE: &str = "AuditsReponses";
    pub const AUDIT: &str = "Audit";
    pub const QUESTION: &str = "Question";
    pub const ANSWER: &str = "Reponse";
    pub const COMMENT: &str = "Commentaires_Details";
    pub const PERCENTAGE: &str = "Pourcentage";
}

pub mod products {
    pub const TABLE: &str = "AuditsProduits";
    pub const NAME: &str = "Nom";
    pub const STARTUP: &str = "Startup";
    pub const STATUS: &str = "Statut";
    pub const PROJECT_TYPE: &str = "Type_de_projet";
    pub const ARCHITECTURE: &str = "Architecture";
    pub const LANGUAGES: &str = "Languages";
    pub const DESCRIPTION: &str = "Description";
    pub const REPOSITORY: &str = "Repository";
    pub const HOMEPAGE: &str = "Homepage";
    pub const DEPENDENCIES: &str = "Dependances";
    pub const SHARED_TOOLS: &str = "Outils_mutualises";
    pub const DEDICATED_TOOLS: &str = "Outils_non_mutualises";
    pub const HOSTING: &str = "Hebergement";
    pub const FRONTEND: &str = "Frontend";
    pub const BACKEND: &str = "Backend";
    pub const AUTHENTICATION: &str = "Authentification";
}

pub mod tools {
    pub const TABLE: &str = "Produits_et_outils";
    pub const NAME: &str = "Nom";
    pub const KIND: &str = "Type";
    pub const KIND_TOOL: &str = "Outil";
    pub const SHARED: &str = "Mutualise";
}

pub mod recommendations {
    pub const TABLE: &str = "AuditsRecommandations";
    pub const PRODUCT: &str = "Produit";
    pub const TEXT: &str = "Recommandation";
    pub const STATUS: &str = "Statut";
    pub const PRIORITY: &str = "Priorite";
    pub const COMMITTEE: &str = "Comite_d_investissement";
    pub const STATUS_DONE: &str = "Fait";
}

pub mod consumptions {
    pub const TABLE: &str = "Consommations";
    pub const PRODUCT: &str = "Produit";
    pub const TOOL: &str = "Outil";
    /// Reference into the hosting mapping table
    pub const IDENTIFIER: &str = "Identifiant";
    pub const COST: &str = "Cout";
    pub const DETAIL: &str = "Detail";
    pub const DATE: &str = "Date";
}

pub mod hosting {
    pub const TABLE: &str = "Mapping_produit_hebergement";
    pub const TOOL_IDENTIFIER: &str = "Identifiant_Outil";
}
