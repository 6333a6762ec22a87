//! Built-in Russian demo content.

use super::{PersonName, SpecializationSeed};

pub(super) const SPECIALIZATIONS: &[SpecializationSeed] = &[
    SpecializationSeed {
        code: "web",
        title: "Веб-разработка",
        description: "Курсы по созданию современных веб-приложений",
    },
    SpecializationSeed {
        code: "mobile",
        title: "Мобильная разработка",
        description: "Разработка приложений для iOS и Android",
    },
    SpecializationSeed {
        code: "data",
        title: "Data Science",
        description: "Анализ данных и машинное обучение",
    },
    SpecializationSeed {
        code: "design",
        title: "UI/UX дизайн",
        description: "Дизайн пользовательских интерфейсов и опыта",
    },
    SpecializationSeed {
        code: "marketing",
        title: "Digital маркетинг",
        description: "Интернет-маркетинг и продвижение",
    },
    SpecializationSeed {
        code: "business",
        title: "Бизнес-аналитика",
        description: "Аналитика данных для бизнес-решений",
    },
];

pub(super) const TECHNOLOGIES: &[&str] = &[
    "Python",
    "JavaScript",
    "React",
    "Django",
    "Vue.js",
    "Node.js",
    "TypeScript",
    "PostgreSQL",
    "MongoDB",
    "Docker",
    "Kubernetes",
    "AWS",
    "Flask",
    "FastAPI",
    "GraphQL",
    "Redis",
    "Celery",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "Scikit-learn",
    "Java",
    "Spring Boot",
    "Kotlin",
    "Swift",
    "Flutter",
    "React Native",
    "Go",
    "Rust",
    // Specialization-specific tools
    "HTML/CSS",
    "Figma",
    "Adobe XD",
    "Sketch",
    "Photoshop",
    "Illustrator",
    "SEO",
    "Google Analytics",
    "Facebook Ads",
    "Email Marketing",
    "Excel",
    "SQL",
    "Tableau",
    "Power BI",
    "Unity",
    "C#",
    "C++",
    "PHP",
    "Laravel",
    "Ruby",
    "Rails",
];

pub(super) const SPECIALIZATION_TECHNOLOGIES: &[(&str, &[&str])] = &[
    (
        "web",
        &["JavaScript", "React", "Vue.js", "Node.js", "TypeScript", "HTML/CSS"],
    ),
    (
        "mobile",
        &["React Native", "Flutter", "Kotlin", "Swift", "Java"],
    ),
    (
        "data",
        &["Python", "TensorFlow", "PyTorch", "Pandas", "NumPy", "Scikit-learn"],
    ),
    (
        "design",
        &["Figma", "Adobe XD", "Sketch", "Photoshop", "Illustrator"],
    ),
    (
        "marketing",
        &["SEO", "Google Analytics", "Facebook Ads", "Email Marketing"],
    ),
    ("business", &["Excel", "SQL", "Tableau", "Power BI", "Python"]),
];

pub(super) const MENTOR_NAMES: &[PersonName] = &[
    PersonName::new("Иван", "Иванов"),
    PersonName::new("Петр", "Петров"),
    PersonName::new("Сергей", "Сергеев"),
    PersonName::new("Алексей", "Алексеев"),
    PersonName::new("Дмитрий", "Дмитриев"),
    PersonName::new("Андрей", "Андреев"),
    PersonName::new("Михаил", "Михайлов"),
    PersonName::new("Анна", "Аннова"),
    PersonName::new("Елена", "Еленова"),
    PersonName::new("Ольга", "Ольгова"),
];

pub(super) const STUDENT_NAMES: &[PersonName] = &[
    PersonName::new("Александр", "Александров"),
    PersonName::new("Владимир", "Владимиров"),
    PersonName::new("Николай", "Николаев"),
    PersonName::new("Артем", "Артемов"),
    PersonName::new("Максим", "Максимов"),
    PersonName::new("Кирилл", "Кириллов"),
    PersonName::new("Екатерина", "Екатеринина"),
    PersonName::new("Мария", "Мариева"),
    PersonName::new("Наталья", "Натальева"),
    PersonName::new("Светлана", "Светланова"),
];

pub(super) const COURSE_TITLES: &[&str] = &[
    "Полный курс Python-разработчика",
    "Современная веб-разработка на React",
    "Data Science и машинное обучение",
    "Full Stack разработка на Django",
    "Разработка мобильных приложений на Flutter",
    "DevOps и облачные вычисления",
    "Продвинутый JavaScript и Node.js",
    "Основы UI/UX дизайна",
    "Основы кибербезопасности",
    "Разработка Blockchain и Web3",
    "Основы искусственного интеллекта",
    "Разработка игр на Unity",
    "Стратегия цифрового маркетинга",
    "Бизнес-аналитика на Python",
    "Паттерны архитектуры ПО",
];

pub(super) const COURSE_DESCRIPTIONS: &[&str] = &[
    "Изучите Python с нуля до продвинутого уровня с реальными проектами",
    "Освойте современную веб-разработку с использованием React, Redux и современных инструментов",
    "Полное руководство по Data Science, статистике и алгоритмам машинного обучения",
    "Создавайте полноценные веб-приложения с использованием Django и React",
    "Создавайте красивые мобильные приложения для iOS и Android с использованием Flutter",
    "Изучите практики DevOps, Docker, Kubernetes и облачные платформы",
    "Глубокое погружение в продвинутые концепции JavaScript и серверную разработку",
    "Изучите принципы дизайна пользовательского интерфейса и пользовательского опыта",
    "Поймите основы кибербезопасности и лучшие практики",
    "Изучите технологию блокчейн, смарт-контракты и децентрализованные приложения",
    "Введение в концепции ИИ, нейронные сети и глубокое обучение",
    "Создавайте 2D и 3D игры с использованием игрового движка Unity",
    "Освойте стратегии цифрового маркетинга и онлайн-рекламы",
    "Изучите бизнес-аналитику с использованием Python и инструментов визуализации данных",
    "Поймите паттерны архитектуры программного обеспечения и проектирование систем",
];

pub(super) const MODULE_TITLES: &[&str] = &[
    "Введение и основы",
    "Основные концепции и техники",
    "Продвинутые темы и лучшие практики",
    "Реальные проекты и приложения",
    "Деплой и поддержка",
    "Оптимизация производительности",
    "Безопасность и тестирование",
    "Будущие тренды и развитие карьеры",
];

pub(super) const MODULE_DESCRIPTIONS: &[&str] = &[
    "Изучите основы и фундаментальные концепции предмета",
    "Освойте основные техники и важные концепции",
    "Изучите продвинутые темы и лучшие практики индустрии",
    "Работайте над реальными проектами и практическими приложениями",
    "Узнайте, как развертывать и поддерживать приложения в продакшене",
    "Оптимизируйте производительность и улучшайте эффективность",
    "Реализуйте меры безопасности и стратегии тестирования",
    "Изучите будущие тренды и подготовьтесь к развитию карьеры",
];

pub(super) const LESSON_TITLES: &[&str] = &[
    "Введение в тему",
    "Настройка среды разработки",
    "Базовый синтаксис и структура",
    "Работа с переменными и типами данных",
    "Управление потоком и циклы",
    "Функции и методы",
    "Объектно-ориентированное программирование",
    "Обработка ошибок и отладка",
    "Работа с файлами и вводом-выводом",
    "Введение в библиотеки и фреймворки",
    "Подключение к базам данных",
    "Разработка и использование API",
    "Тестирование и TDD",
    "Стратегии развертывания",
    "Мониторинг производительности",
    "Лучшие практики безопасности",
    "Ревью кода и совместная работа",
    "Структура проекта и архитектура",
    "Непрерывная интеграция/развертывание",
    "Советы по карьере и подготовка к собеседованию",
];

pub(super) const LESSON_CONTENTS: &[&str] = &[
    "В этом уроке мы представим основные концепции и цели курса.",
    "Узнайте, как настроить среду разработки со всеми необходимыми инструментами и конфигурациями.",
    "Поймите основные правила синтаксиса и структуру программы языка.",
    "Изучите различные типы данных и научитесь эффективно работать с переменными.",
    "Освойте операторы управления потоком и различные типы циклов для логики программы.",
    "Научитесь создавать переиспользуемые функции и методы для организации кода.",
    "Поймите принципы объектно-ориентированного программирования и паттерны проектирования.",
    "Изучите техники отладки и обработки ошибок в ваших приложениях.",
    "Изучите операции с файлами и механизмы ввода-вывода в программировании.",
    "Познакомьтесь с популярными библиотеками и фреймворками, используемыми в индустрии.",
    "Узнайте, как подключаться к базам данных и выполнять CRUD-операции.",
    "Поймите, как создавать и использовать RESTful API.",
    "Освойте методологии тестирования и подход разработки через тестирование.",
    "Изучите различные стратегии развертывания веб-приложений.",
    "Поймите, как мониторить и оптимизировать производительность приложения.",
    "Изучите лучшие практики безопасности и распространенные уязвимости.",
    "Поймите процессы ревью кода и рабочие процессы совместной разработки.",
    "Узнайте о структуре проекта и архитектурных паттернах.",
    "Освойте пайплайны CI/CD и инструменты автоматизации.",
    "Получите советы по карьере и рекомендации для технических собеседований.",
];
