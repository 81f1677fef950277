//! Built-in message tables.

use super::catalog::MessageKey;

pub(crate) fn english() -> [(MessageKey, &'static str); 8] {
    [
        (
            MessageKey::Launch,
            "Welcome to Fizz Buzz. We'll each take turns counting up from one. \
             However, you must replace numbers divisible by 3 with the word fizz, \
             and numbers divisible by 5 with the word buzz. If a number is divisible \
             by both 3 and 5, you should instead say fizz buzz. If you get one wrong, \
             you lose. OK, I'll start... One.",
        ),
        (
            MessageKey::LaunchReprompt,
            "Now you must decide what to say for the number 2.",
        ),
        (
            MessageKey::WrongAnswer,
            "I'm sorry, the correct response was {answer}. You lose! Thanks for playing Fizz Buzz.",
        ),
        (
            MessageKey::Help,
            "You must keep track of what number we are on and decide what to say \
             based on the rules of the game. If you are not sure, take a guess.",
        ),
        (
            MessageKey::Stop,
            "Thank you for playing Fizz Buzz. I hope you enjoyed it.",
        ),
        (
            MessageKey::Fallback,
            "Sorry, I didn't understand what you said. Please say a number or one \
             of the keywords for the Fizz Buzz game.",
        ),
        (
            MessageKey::Error,
            "Sorry, I had trouble doing what you asked. Please try again.",
        ),
        (MessageKey::Reflector, "You just triggered {intent}."),
    ]
}

pub(crate) fn spanish_us() -> [(MessageKey, &'static str); 8] {
    [
        (
            MessageKey::Launch,
            "Bienvenido a Fizz Buzz. Cada uno de nosotros se turnará para contar desde uno. \
             Sin embargo, debes reemplazar los números divisibles por 3 con la palabra fizz, \
             y los números divisibles por 5 con la palabra buzz. Si un número es divisible \
             por 3 y por 5, debes decir fizz buzz. Si te equivocas, pierdes. \
             Bien, empiezo yo... Uno.",
        ),
        (
            MessageKey::LaunchReprompt,
            "Ahora debes decidir qué decir para el número 2.",
        ),
        (
            MessageKey::WrongAnswer,
            "Lo siento, la respuesta correcta era {answer}. ¡Pierdes! \
             Gracias por jugar a Fizz Buzz.",
        ),
        (
            MessageKey::Help,
            "Debes recordar en qué número vamos y decidir qué decir según las reglas \
             del juego. Si no estás seguro, adivina.",
        ),
        (
            MessageKey::Stop,
            "Gracias por jugar a Fizz Buzz. Espero que lo hayas disfrutado.",
        ),
        (
            MessageKey::Fallback,
            "Lo siento, no entendí lo que dijiste. Di un número o una de las palabras \
             clave del juego Fizz Buzz.",
        ),
        (
            MessageKey::Error,
            "Lo siento, tuve problemas para hacer lo que me pediste. Inténtalo de nuevo.",
        ),
        (MessageKey::Reflector, "Acabas de activar {intent}."),
    ]
}
