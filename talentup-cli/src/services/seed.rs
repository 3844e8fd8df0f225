// Static catalog served by the mock source

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    AttendedWebinar, Certification, ChartPoint, Education, Experience, ReportData, ReportSummary,
    StatCard, StatChange, TopWebinar, Trainee, TraineeStatus, UpcomingWebinar, Webinar,
    WebinarStatus,
};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn webinar(
    id: &str,
    title: &str,
    presenter: &str,
    scheduled_at: NaiveDateTime,
    duration_minutes: u32,
    attendees: u32,
    category: &str,
    status: WebinarStatus,
    thumbnail: &str,
    description: &str,
) -> Webinar {
    Webinar {
        id: id.to_string(),
        title: title.to_string(),
        presenter: presenter.to_string(),
        scheduled_at,
        duration_minutes,
        category: category.to_string(),
        status,
        attendees,
        thumbnail: Some(thumbnail.to_string()),
        video: None,
        description: Some(description.to_string()),
    }
}

pub fn webinars() -> Vec<Webinar> {
    vec![
        webinar(
            "1",
            "Introduction à React pour débutants",
            "Marie Dubois",
            at(2023, 6, 12, 14, 0),
            90,
            45,
            "Développement Web",
            WebinarStatus::Completed,
            "public/f64815e6-3df2-40f5-90df-32208f468511.jpeg",
            "Apprenez les fondamentaux de React, de la création de composants à la gestion d'état. Ce webinaire est conçu pour les développeurs ayant une connaissance de base en HTML, CSS et JavaScript.",
        ),
        webinar(
            "2",
            "Maîtriser Tailwind CSS en entreprise",
            "Thomas Martin",
            at(2023, 6, 15, 10, 0),
            120,
            32,
            "Design Front-end",
            WebinarStatus::Live,
            "public/tailwind.png",
            "Découvrez les meilleures pratiques pour utiliser Tailwind CSS dans vos projets d'entreprise, avec des conseils pour l'organisation du code et l'optimisation des performances.",
        ),
        webinar(
            "3",
            "TypeScript Avancé pour les équipes de développement",
            "Julie Bernard",
            at(2023, 6, 20, 15, 30),
            105,
            28,
            "Programmation",
            WebinarStatus::Upcoming,
            "public/typescriptAvancée.webp",
            "Ce webinaire aborde les fonctionnalités avancées de TypeScript : génériques, types conditionnels, inférence de types et stratégies pour améliorer la qualité du code dans les grandes bases de code.",
        ),
        webinar(
            "4",
            "API RESTful avec Node.js et Express",
            "Alexandre Lefebvre",
            at(2023, 6, 25, 11, 0),
            120,
            40,
            "Backend",
            WebinarStatus::Upcoming,
            "public/nodejsAPI.png",
            "Créez des API RESTful robustes avec Node.js et Express. Nous couvrirons la structure des routes, la validation des données, l'authentification et la documentation.",
        ),
        webinar(
            "5",
            "Optimisation des performances React",
            "Sophie Moreau",
            at(2023, 6, 30, 14, 0),
            90,
            35,
            "Développement Web",
            WebinarStatus::Upcoming,
            "public/reactPerformance.jpeg",
            "Améliorez les performances de vos applications React avec des techniques avancées : memoization, code splitting, lazy loading, et optimisation du rendu.",
        ),
        webinar(
            "6",
            "Introduction à GraphQL",
            "Marc Dubois",
            at(2023, 7, 5, 10, 30),
            120,
            30,
            "API",
            WebinarStatus::Upcoming,
            "public/graphql.png",
            "Découvrez comment GraphQL peut remplacer les API REST traditionnelles avec un modèle plus efficace et flexible pour les requêtes de données.",
        ),
        webinar(
            "7",
            "Tests automatisés avec Jest et Testing Library",
            "Clara Martin",
            at(2023, 7, 10, 15, 0),
            105,
            25,
            "Qualité logicielle",
            WebinarStatus::Upcoming,
            "public/reactTestingLibraire.jpeg",
            "Apprenez à mettre en place une stratégie de tests efficace pour vos applications React avec Jest et React Testing Library.",
        ),
        webinar(
            "8",
            "Déploiement continu avec GitHub Actions",
            "Antoine Bernard",
            at(2023, 7, 15, 11, 0),
            90,
            20,
            "DevOps",
            WebinarStatus::Upcoming,
            "public/githubActions.jpeg",
            "Automatisez vos workflows de développement avec GitHub Actions pour des déploiements fluides et sans erreur.",
        ),
    ]
}

fn upcoming(title: &str, date: &str, time: &str, presenter: &str) -> UpcomingWebinar {
    UpcomingWebinar {
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        presenter: presenter.to_string(),
    }
}

pub fn upcoming_webinars() -> Vec<UpcomingWebinar> {
    vec![
        upcoming("Gestion de projet Agile", "22 Juin", "11:00", "Nicolas Petit"),
        upcoming(
            "UX/UI Design pour développeurs",
            "23 Juin",
            "14:30",
            "Amélie Lefebvre",
        ),
        upcoming("DevOps pour les startups", "24 Juin", "16:00", "Pierre Moreau"),
        upcoming("Bases de données NoSQL", "27 Juin", "10:00", "Camille Blanc"),
    ]
}

fn stat(title: &str, value: &str, change: &str, positive: bool) -> StatCard {
    StatCard {
        title: title.to_string(),
        value: value.to_string(),
        change: Some(StatChange {
            value: change.to_string(),
            positive,
        }),
    }
}

pub fn stats() -> Vec<StatCard> {
    vec![
        stat("Webinaires Totaux", "124", "12%", true),
        stat("Participants", "1,893", "8%", true),
        stat("Sessions à venir", "18", "2%", false),
        stat("Taux d'achèvement", "87%", "5%", true),
    ]
}

fn attended(id: &str, title: &str, date: &str, presenter: &str, rating: u8) -> AttendedWebinar {
    AttendedWebinar {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        presenter: presenter.to_string(),
        rating: Some(rating),
    }
}

fn experience(role: &str, company: &str, period: &str, description: &str) -> Experience {
    Experience {
        role: role.to_string(),
        company: company.to_string(),
        period: period.to_string(),
        description: description.to_string(),
    }
}

fn education(degree: &str, institution: &str, period: &str) -> Education {
    Education {
        degree: degree.to_string(),
        institution: institution.to_string(),
        period: period.to_string(),
    }
}

fn certification(name: &str, issuer: &str, date: &str) -> Certification {
    Certification {
        name: name.to_string(),
        issuer: issuer.to_string(),
        date: date.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Bare profile; richer entries fill in the optional sections afterwards
#[allow(clippy::too_many_arguments)]
fn trainee(
    id: &str,
    name: &str,
    email: &str,
    program: &str,
    progress: u8,
    status: TraineeStatus,
    attended_count: u32,
    total: u32,
) -> Trainee {
    Trainee {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        location: None,
        title: None,
        bio: None,
        program: program.to_string(),
        progress,
        status,
        webinars_attended: attended_count,
        total_webinars: total,
        enrollment_date: None,
        skills: Vec::new(),
        attended_webinars: Vec::new(),
        experience: Vec::new(),
        education: Vec::new(),
        certifications: Vec::new(),
    }
}

pub fn trainees() -> Vec<Trainee> {
    let react = || {
        attended(
            "1",
            "Introduction à React pour débutants",
            "12 Juin 2023",
            "Marie Dubois",
            5,
        )
    };
    let tailwind = |rating| {
        attended(
            "2",
            "Maîtriser Tailwind CSS en entreprise",
            "15 Juin 2023",
            "Thomas Martin",
            rating,
        )
    };
    let typescript = |rating| {
        attended(
            "3",
            "TypeScript Avancé pour les équipes de développement",
            "20 Juin 2023",
            "Julie Bernard",
            rating,
        )
    };
    let node = || {
        attended(
            "4",
            "API RESTful avec Node.js et Express",
            "25 Juin 2023",
            "Alexandre Lefebvre",
            5,
        )
    };
    let perf = |rating| {
        attended(
            "5",
            "Optimisation des performances React",
            "30 Juin 2023",
            "Sophie Moreau",
            rating,
        )
    };
    let graphql = |rating| {
        attended(
            "6",
            "Introduction à GraphQL",
            "5 Juillet 2023",
            "Marc Dubois",
            rating,
        )
    };
    let jest = |rating| {
        attended(
            "7",
            "Tests automatisés avec Jest et Testing Library",
            "10 Juillet 2023",
            "Clara Martin",
            rating,
        )
    };

    let mut sophie = trainee(
        "1",
        "Sophie Martin",
        "sophie.martin@example.com",
        "Développement Web Full Stack",
        85,
        TraineeStatus::Active,
        12,
        15,
    );
    sophie.phone = Some("06 12 34 56 78".to_string());
    sophie.location = Some("Lyon, France".to_string());
    sophie.title = Some("Développeuse Web Junior".to_string());
    sophie.bio = Some("Passionnée par le développement web et les nouvelles technologies, je suis en reconversion professionnelle après 5 ans dans le marketing digital. Je cherche à approfondir mes compétences en développement full stack pour créer des applications web performantes et accessibles.".to_string());
    sophie.enrollment_date = Some("15/02/2023".to_string());
    sophie.skills = strings(&["HTML/CSS", "JavaScript", "React", "Node.js", "Express", "MongoDB"]);
    sophie.attended_webinars = vec![react(), tailwind(4), typescript(5)];
    sophie.experience = vec![
        experience(
            "Chef de produit marketing",
            "AgenceDigital",
            "Jan 2018 - Déc 2022",
            "Gestion de campagnes marketing pour des clients du secteur tech, analyse de données et création de stratégies digitales.",
        ),
        experience(
            "Assistante marketing",
            "TechStart",
            "Juin 2016 - Déc 2017",
            "Support aux opérations marketing, gestion des réseaux sociaux et organisation d'événements.",
        ),
    ];
    sophie.education = vec![
        education("Master en Marketing Digital", "École de Commerce de Lyon", "2014 - 2016"),
        education("Licence en Communication", "Université Lyon 2", "2011 - 2014"),
    ];
    sophie.certifications = vec![
        certification("JavaScript - Les Fondamentaux", "OpenClassrooms", "Mars 2023"),
        certification("React - Niveau Intermédiaire", "Codecademy", "Mai 2023"),
    ];

    let mut lucas = trainee(
        "2",
        "Lucas Dubois",
        "lucas.dubois@example.com",
        "Design UX/UI",
        70,
        TraineeStatus::Active,
        8,
        12,
    );
    lucas.phone = Some("07 23 45 67 89".to_string());
    lucas.location = Some("Paris, France".to_string());
    lucas.title = Some("Designer UX/UI Junior".to_string());
    lucas.bio = Some("Designer passionné par l'expérience utilisateur et l'accessibilité. Mon objectif est de créer des interfaces intuitives et esthétiques qui répondent aux besoins des utilisateurs et aux objectifs business.".to_string());
    lucas.enrollment_date = Some("03/03/2023".to_string());
    lucas.skills = strings(&[
        "Figma",
        "Adobe XD",
        "Sketch",
        "Wireframing",
        "Prototyping",
        "Design System",
    ]);
    lucas.attended_webinars = vec![perf(4), jest(3)];
    lucas.experience = vec![experience(
        "Stagiaire UI Designer",
        "Studio Design & Co",
        "Jan 2022 - Juin 2022",
        "Création d'interfaces utilisateur pour applications mobiles et web, participation aux ateliers de conception UX.",
    )];
    lucas.education = vec![education(
        "Bachelor en Design Numérique",
        "École de Design de Paris",
        "2019 - 2022",
    )];

    let mut emma = trainee(
        "3",
        "Emma Petit",
        "emma.petit@example.com",
        "Marketing Digital",
        100,
        TraineeStatus::Completed,
        10,
        10,
    );
    emma.phone = Some("06 34 56 78 90".to_string());
    emma.location = Some("Bordeaux, France".to_string());
    emma.title = Some("Spécialiste Marketing Digital".to_string());
    emma.enrollment_date = Some("10/01/2023".to_string());
    emma.skills = strings(&[
        "SEO/SEA",
        "Google Analytics",
        "Content Marketing",
        "Social Media",
        "Email Marketing",
    ]);
    emma.attended_webinars = vec![
        node(),
        graphql(5),
        attended(
            "8",
            "Déploiement continu avec GitHub Actions",
            "15 Juillet 2023",
            "Antoine Bernard",
            4,
        ),
    ];
    emma.experience = vec![
        experience(
            "Responsable marketing junior",
            "E-commerce Solutions",
            "Sept 2020 - Présent",
            "Élaboration et mise en œuvre de stratégies marketing digitales, analyse de performances et optimisation des campagnes.",
        ),
        experience(
            "Assistante marketing",
            "Retail Group",
            "Jan 2019 - Août 2020",
            "Gestion des campagnes email, mise à jour du site web et analyse des statistiques de vente.",
        ),
    ];
    emma.education = vec![
        education("Master en Marketing Digital", "IAE Bordeaux", "2017 - 2019"),
        education("Licence en Commerce", "Université de Bordeaux", "2014 - 2017"),
    ];
    emma.certifications = vec![
        certification("Google Analytics Individual Qualification", "Google", "Fév 2023"),
        certification("Certification SEO Avancé", "SEMrush Academy", "Avr 2023"),
        certification("Social Media Marketing", "HubSpot Academy", "Mai 2023"),
    ];

    let mut thomas = trainee(
        "4",
        "Thomas Bernard",
        "thomas.bernard@example.com",
        "Data Science",
        45,
        TraineeStatus::Active,
        5,
        12,
    );
    thomas.skills = strings(&["Python", "SQL", "Pandas", "NumPy", "Data Visualization"]);
    thomas.attended_webinars = vec![tailwind(4)];

    let lea = trainee(
        "5",
        "Léa Richard",
        "lea.richard@example.com",
        "Product Management",
        0,
        TraineeStatus::Inactive,
        0,
        8,
    );

    let mut hugo = trainee(
        "6",
        "Hugo Moreau",
        "hugo.moreau@example.com",
        "Développement Web Front-End",
        30,
        TraineeStatus::Active,
        3,
        10,
    );
    hugo.phone = Some("06 45 67 89 12".to_string());
    hugo.location = Some("Toulouse, France".to_string());
    hugo.enrollment_date = Some("05/04/2023".to_string());
    hugo.skills = strings(&["HTML/CSS", "JavaScript", "React", "Tailwind CSS"]);
    hugo.attended_webinars = vec![react()];

    let mut manon = trainee(
        "7",
        "Manon Durand",
        "manon.durand@example.com",
        "Intelligence Artificielle",
        90,
        TraineeStatus::Active,
        9,
        10,
    );
    manon.phone = Some("07 56 78 90 12".to_string());
    manon.location = Some("Lille, France".to_string());
    manon.title = Some("Data Scientist Junior".to_string());
    manon.enrollment_date = Some("20/01/2023".to_string());
    manon.skills = strings(&["Python", "TensorFlow", "PyTorch", "Machine Learning", "NLP"]);
    manon.attended_webinars = vec![typescript(4), perf(5)];
    manon.experience = vec![experience(
        "Stagiaire Data Analyst",
        "Tech Solutions",
        "Juin 2022 - Déc 2022",
        "Analyse de données clients, création de dashboards et rapports pour l'équipe marketing.",
    )];
    manon.education = vec![
        education(
            "Master en Science des Données",
            "École d'Ingénieurs de Lille",
            "2020 - 2022",
        ),
        education(
            "Licence en Mathématiques Appliquées",
            "Université de Lille",
            "2017 - 2020",
        ),
    ];
    manon.certifications = vec![
        certification("Deep Learning Specialization", "Coursera", "Déc 2022"),
        certification("Machine Learning Engineer", "DataCamp", "Mar 2023"),
    ];

    let mut antoine = trainee(
        "8",
        "Antoine Lambert",
        "antoine.lambert@example.com",
        "Cybersécurité",
        100,
        TraineeStatus::Completed,
        12,
        12,
    );
    antoine.phone = Some("06 78 90 12 34".to_string());
    antoine.location = Some("Nantes, France".to_string());
    antoine.title = Some("Expert en Cybersécurité".to_string());
    antoine.bio = Some("Professionnel de la cybersécurité avec une expertise en analyse de vulnérabilités et réponse aux incidents. Je me forme continuellement pour rester à jour avec les dernières menaces et solutions de sécurité.".to_string());
    antoine.enrollment_date = Some("05/12/2022".to_string());
    antoine.skills = strings(&[
        "Pentesting",
        "Analyse de vulnérabilité",
        "Cryptographie",
        "Forensic",
        "Sécurité réseau",
    ]);
    antoine.attended_webinars = vec![node(), graphql(4), jest(5)];
    antoine.experience = vec![
        experience(
            "Analyste en cybersécurité",
            "SecureNet",
            "Jan 2019 - Présent",
            "Surveillance de la sécurité des systèmes, analyse des incidents et mise en place de mesures correctives.",
        ),
        experience(
            "Administrateur système",
            "IT Solutions",
            "Mar 2016 - Déc 2018",
            "Gestion des infrastructures réseau, maintenance des serveurs et support technique aux utilisateurs.",
        ),
    ];
    antoine.education = vec![
        education(
            "Master en Sécurité des Systèmes d'Information",
            "ISEN Nantes",
            "2014 - 2016",
        ),
        education("Licence en Informatique", "Université de Nantes", "2011 - 2014"),
    ];
    antoine.certifications = vec![
        certification("Certified Ethical Hacker (CEH)", "EC-Council", "Jan 2021"),
        certification("CISSP", "ISC²", "Nov 2022"),
        certification("CompTIA Security+", "CompTIA", "Mar 2019"),
    ];

    vec![sophie, lucas, emma, thomas, lea, hugo, manon, antoine]
}

fn point(name: &str, value: u64) -> ChartPoint {
    ChartPoint {
        name: name.to_string(),
        value,
    }
}

fn summary(title: &str, value: &str, trend: i32) -> ReportSummary {
    ReportSummary {
        title: title.to_string(),
        value: value.to_string(),
        trend,
    }
}

fn top(title: &str, presenter: &str, date: &str, attendees: u32, completion_rate: u8) -> TopWebinar {
    TopWebinar {
        title: title.to_string(),
        presenter: presenter.to_string(),
        date: date.to_string(),
        attendees,
        completion_rate,
    }
}

pub fn report() -> ReportData {
    ReportData {
        summary: vec![
            summary("Total participants", "1,248", 12),
            summary("Taux d'assiduité", "87%", 5),
            summary("Webinaires réalisés", "32", 0),
            summary("Note moyenne", "4.8/5", -1),
        ],
        monthly_attendance: vec![
            point("Jan", 342),
            point("Fév", 458),
            point("Mar", 521),
            point("Avr", 398),
            point("Mai", 487),
            point("Juin", 623),
            point("Juil", 512),
            point("Août", 324),
            point("Sept", 586),
            point("Oct", 678),
            point("Nov", 435),
            point("Déc", 298),
        ],
        categories: vec![
            point("Développement", 15),
            point("Design", 8),
            point("Marketing", 7),
            point("Data", 5),
            point("Soft skills", 4),
        ],
        top_webinars: vec![
            top("Introduction à React", "Marie Lambert", "12 Oct 2023", 245, 92),
            top("Fondamentaux du Design UX", "Paul Durand", "15 Sept 2023", 198, 88),
            top("Marketing Digital Avancé", "Julien Martin", "3 Nov 2023", 176, 84),
            top("Python pour Data Science", "Claire Bernard", "22 Oct 2023", 152, 90),
            top(
                "Leadership et gestion d'équipe",
                "Alexandre Robert",
                "8 Déc 2023",
                124,
                78,
            ),
        ],
    }
}
